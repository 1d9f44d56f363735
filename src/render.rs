// ============================================================================
// RENDERING
// ============================================================================

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::assets::WheelImage;
use crate::config::{Color, WheelConfig};
use crate::session::WheelSession;
use crate::text::{FontMeasure, TextLine, TextMeasure, WrapLayout};

// ============================================================================
// CORE DATA TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x as f64
            && py >= self.y as f64
            && px < (self.x + self.width as i32) as f64
            && py < (self.y + self.height as i32) as f64
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Where each surface sits inside the window frame buffer, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub wheel: Rect,
    pub result: Rect,
    pub button: Rect,
}

impl Layout {
    pub fn new(wheel_width: usize, wheel_height: usize, config: &WheelConfig) -> Self {
        let width = wheel_width.max(config.min_window_width);
        let wheel_x = (width - wheel_width) as i32 / 2;
        let wheel = Rect::new(wheel_x, 0, wheel_width, wheel_height);
        let result = Rect::new(0, wheel_height as i32, width, config.result_height);

        let strip_top = (wheel_height + config.result_height) as i32;
        let button_width = config.button_width.min(width);
        let button_height = config.button_strip_height.saturating_sub(16);
        let button = Rect::new(
            (width - button_width) as i32 / 2,
            strip_top + (config.button_strip_height - button_height) as i32 / 2,
            button_width,
            button_height,
        );

        Self {
            width,
            height: wheel_height + config.result_height + config.button_strip_height,
            wheel,
            result,
            button,
        }
    }
}

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.max(0) as usize;
        let y0 = rect.y.max(0) as usize;
        let x1 = ((rect.x + rect.width as i32).max(0) as usize).min(self.width);
        let y1 = ((rect.y + rect.height as i32).max(0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let idx = (y * self.width + x) * 4;
                self.frame[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, 0xff]);
            }
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = &self.frame[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug)]
enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    Wheel {
        rect: Rect,
        angle: f64,
    },
    Pointer {
        rect: Rect,
        direction_deg: f64,
        color: Color,
    },
    Text {
        line: TextLine,
        origin: (i32, i32),
        clip: Rect,
        color: Color,
    },
}

struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn render(
        &self,
        canvas: &mut Canvas,
        image: Option<&WheelImage>,
        font: Option<&Font<'static>>,
        font_size: f32,
    ) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
                DrawCommand::Wheel { rect, angle } => {
                    // nothing to draw until the face has loaded
                    if let Some(image) = image {
                        blit_rotated(canvas, *rect, image, *angle);
                    }
                }
                DrawCommand::Pointer {
                    rect,
                    direction_deg,
                    color,
                } => draw_pointer(canvas, *rect, *direction_deg, *color),
                DrawCommand::Text {
                    line,
                    origin,
                    clip,
                    color,
                } => {
                    if let Some(font) = font {
                        draw_text(
                            canvas,
                            origin.0 + line.x.round() as i32,
                            origin.1 + line.y.round() as i32,
                            &line.text,
                            font,
                            Scale::uniform(font_size),
                            *clip,
                            *color,
                        );
                    }
                }
            }
        }
    }
}

// ============================================================================
// FRAME COMPOSITION
// ============================================================================

/// Direction of the pointer, clockwise from twelve o'clock.
fn pointer_direction_deg(pointer_offset_deg: f64) -> f64 {
    (360.0 - pointer_offset_deg).rem_euclid(360.0)
}

/// Draws one full frame: wheel, result text and the spin button.
pub fn render_frame(
    canvas: &mut Canvas,
    layout: &Layout,
    session: &WheelSession,
    config: &WheelConfig,
    image: Option<&WheelImage>,
    font: Option<&Font<'static>>,
) {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color));

    // Wheel surface redraws every frame, spinning or not
    scene.add_command(DrawCommand::Wheel {
        rect: layout.wheel,
        angle: session.spin_state().angle,
    });
    if config.show_pointer && image.is_some() {
        scene.add_command(DrawCommand::Pointer {
            rect: layout.wheel,
            direction_deg: pointer_direction_deg(config.pointer_offset_deg),
            color: config.pointer_color,
        });
    }

    if let (Some(result), Some(font)) = (session.result(), font) {
        let text = format!("{}{}", config.result_prefix, result.label);
        let wrap = WrapLayout {
            surface_width: layout.result.width as f32,
            surface_height: layout.result.height as f32,
            padding: config.result_padding,
            line_height: config.line_height,
        };
        let measure = FontMeasure::new(font, config.font_size);
        for line in wrap.wrap(&text, &measure) {
            scene.add_command(DrawCommand::Text {
                line,
                origin: (layout.result.x, layout.result.y),
                clip: layout.result,
                color: config.text_color,
            });
        }
    }

    let button_color = if session.is_spinning() {
        config.button_busy_color
    } else {
        config.button_color
    };
    scene.add_command(DrawCommand::FillRect {
        rect: layout.button,
        color: button_color,
    });
    if let Some(font) = font {
        let (cx, cy) = layout.button.center();
        let v_metrics = font.v_metrics(Scale::uniform(config.font_size));
        let baseline = cy + ((v_metrics.ascent + v_metrics.descent) / 2.0) as f64;
        scene.add_command(DrawCommand::Text {
            line: TextLine {
                text: config.button_label.clone(),
                x: cx as f32,
                y: baseline as f32,
            },
            origin: (0, 0),
            clip: layout.button,
            color: config.button_text_color,
        });
    }

    scene.render(canvas, image, font, config.font_size);
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let src = [color.r as f32, color.g as f32, color.b as f32];
        let a = alpha.clamp(0.0, 1.0);
        let out = [
            (src[0] * a + frame[idx] as f32 * (1.0 - a)).round() as u8,
            (src[1] * a + frame[idx + 1] as f32 * (1.0 - a)).round() as u8,
            (src[2] * a + frame[idx + 2] as f32 * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

/// Draws `image` centred in `rect`, rotated clockwise by `angle` radians.
/// Pixels are sampled nearest-neighbour through the inverse rotation.
pub fn blit_rotated(canvas: &mut Canvas, rect: Rect, image: &WheelImage, angle: f64) {
    let (cx, cy) = rect.center();
    let (sin, cos) = angle.sin_cos();
    let half_w = image.width as f64 / 2.0;
    let half_h = image.height as f64 / 2.0;

    let x_start = rect.x.max(0);
    let y_start = rect.y.max(0);
    let x_end = (rect.x + rect.width as i32).min(canvas.width as i32);
    let y_end = (rect.y + rect.height as i32).min(canvas.height as i32);

    for y in y_start..y_end {
        let dy = y as f64 + 0.5 - cy;
        for x in x_start..x_end {
            let dx = x as f64 + 0.5 - cx;
            let sx = dx * cos + dy * sin + half_w;
            let sy = -dx * sin + dy * cos + half_h;
            if let Some([r, g, b, a]) = image.pixel(sx.floor() as i64, sy.floor() as i64) {
                if a > 0 {
                    set_pixel(
                        canvas.frame,
                        canvas.width,
                        x as usize,
                        y as usize,
                        Color::new(r, g, b),
                        a as f32 / 255.0,
                    );
                }
            }
        }
    }
}

/// Filled triangle on the wheel rim, tip facing the hub.
fn draw_pointer(canvas: &mut Canvas, rect: Rect, direction_deg: f64, color: Color) {
    let (cx, cy) = rect.center();
    let radius = rect.width.min(rect.height) as f64 / 2.0;
    let depth = (radius * 0.12).max(8.0);
    let half_base = depth * 0.6;

    let (sin, cos) = direction_deg.to_radians().sin_cos();
    let (ux, uy) = (sin, -cos);
    let (px, py) = (-uy, ux);

    let tip = (cx + ux * (radius - depth), cy + uy * (radius - depth));
    let base_mid = (cx + ux * (radius - 1.0), cy + uy * (radius - 1.0));
    let a = (base_mid.0 + px * half_base, base_mid.1 + py * half_base);
    let b = (base_mid.0 - px * half_base, base_mid.1 - py * half_base);
    fill_triangle(canvas, tip, a, b, color);
}

fn fill_triangle(
    canvas: &mut Canvas,
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    color: Color,
) {
    let edge = |a: (f64, f64), b: (f64, f64), x: f64, y: f64| {
        (b.0 - a.0) * (y - a.1) - (b.1 - a.1) * (x - a.0)
    };
    let min_x = p0.0.min(p1.0).min(p2.0).floor().max(0.0) as usize;
    let max_x = (p0.0.max(p1.0).max(p2.0).ceil() as usize).min(canvas.width);
    let min_y = p0.1.min(p1.1).min(p2.1).floor().max(0.0) as usize;
    let max_y = (p0.1.max(p1.1).max(p2.1).ceil() as usize).min(canvas.height);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
            let w0 = edge(p1, p2, fx, fy);
            let w1 = edge(p2, p0, fx, fy);
            let w2 = edge(p0, p1, fx, fy);
            let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
            if inside {
                set_pixel(canvas.frame, canvas.width, x, y, color, 1.0);
            }
        }
    }
}

/// Draws `text` horizontally centred on `x` with its baseline on `y`,
/// clipped to `clip`.
fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font: &Font<'static>,
    scale: Scale,
    clip: Rect,
    color: Color,
) {
    let width = FontMeasure::new(font, scale.x).measure(text);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(x as f32 - width / 2.0, y as f32))
        .collect();
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0
                    && py >= 0
                    && (px as usize) < canvas.width
                    && (py as usize) < canvas.height
                    && clip.contains(px as f64, py as f64)
                {
                    set_pixel(canvas.frame, canvas.width, px as usize, py as usize, color, v);
                }
            });
        }
    }
}
