// ============================================================================
// TEXT LAYOUT
// ============================================================================

use rusttype::{point, Font, Scale};

/// Horizontal extent of a run of text, in pixels.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

/// Measures by glyph advance at a fixed pixel size.
pub struct FontMeasure<'f> {
    font: &'f Font<'static>,
    scale: Scale,
}

impl<'f> FontMeasure<'f> {
    pub fn new(font: &'f Font<'static>, font_size: f32) -> Self {
        Self {
            font,
            scale: Scale::uniform(font_size),
        }
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn measure(&self, text: &str) -> f32 {
        // advance widths, so trailing spaces count
        self.font
            .layout(text, self.scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }
}

/// One line of wrapped text, anchored at its horizontal centre and baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapLayout {
    pub surface_width: f32,
    pub surface_height: f32,
    /// Horizontal room left free across both sides.
    pub padding: f32,
    pub line_height: f32,
}

impl WrapLayout {
    pub fn max_width(&self) -> f32 {
        self.surface_width - self.padding
    }

    /// Greedy word wrap. Lines start half a line above the vertical centre and
    /// grow downward without bound.
    pub fn wrap(&self, text: &str, measure: &impl TextMeasure) -> Vec<TextLine> {
        let max_width = self.max_width();
        let x = self.surface_width / 2.0;
        let mut y = self.surface_height / 2.0 - self.line_height / 2.0;

        let mut lines = Vec::new();
        let mut line = String::new();
        for (n, word) in text.split(' ').enumerate() {
            let candidate = format!("{line}{word} ");
            if measure.measure(&candidate) > max_width && n > 0 {
                lines.push(TextLine {
                    text: line.trim().to_string(),
                    x,
                    y,
                });
                line = format!("{word} ");
                y += self.line_height;
            } else {
                line = candidate;
            }
        }
        lines.push(TextLine {
            text: line.trim().to_string(),
            x,
            y,
        });
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is ten pixels wide.
    struct Monospace;

    impl TextMeasure for Monospace {
        fn measure(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn layout(width: f32) -> WrapLayout {
        WrapLayout {
            surface_width: width,
            surface_height: 100.0,
            padding: 20.0,
            line_height: 24.0,
        }
    }

    #[test]
    fn short_text_is_a_single_centred_line() {
        let lines = layout(400.0).wrap("List of topics to: AI in Education", &Monospace);
        assert_eq!(
            lines,
            vec![TextLine {
                text: "List of topics to: AI in Education".to_string(),
                x: 200.0,
                y: 38.0,
            }]
        );
    }

    #[test]
    fn long_text_breaks_greedily() {
        // 110px holds eleven characters, trailing space included
        let lines = layout(130.0).wrap("List of topics to: Societal Impact", &Monospace);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["List of", "topics to:", "Societal", "Impact"]);

        let ys: Vec<f32> = lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![38.0, 62.0, 86.0, 110.0]);
        assert!(lines.iter().all(|l| l.x == 65.0));
    }

    #[test]
    fn oversized_first_word_stays_on_its_own_line() {
        let lines = layout(60.0).wrap("Methodology & Meta-Research", &Monospace);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Methodology", "&", "Meta-Research"]);
    }

    #[test]
    fn empty_text_still_yields_one_line() {
        let lines = layout(200.0).wrap("", &Monospace);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
    }

    #[test]
    fn trailing_space_counts_toward_width() {
        // "ab c " is 50px, exactly at the limit
        let fits = layout(70.0).wrap("ab c", &Monospace);
        assert_eq!(fits.len(), 1);
        // "ab cd " is 60px and spills
        let spills = layout(70.0).wrap("ab cd", &Monospace);
        assert_eq!(spills.len(), 2);
    }
}
