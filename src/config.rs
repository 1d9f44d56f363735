use std::path::{Path, PathBuf};

use bon::Builder;
use serde::Deserialize;

use crate::error::WheelError;

/// Color representation for wheel and result surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Labels painted on the stock wheel face, clockwise from the first wedge.
pub const DEFAULT_LABELS: [&str; 9] = [
    "Experimental Learning",
    "Programming Education",
    "Technology-Enhanced Learning",
    "AI in Education",
    "Educational Data Science",
    "Methodology & Meta-Research",
    "[empty]",
    "Societal Impact",
    "Experimental Learning",
];

fn default_labels() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|label| label.to_string()).collect()
}

#[derive(Debug, Clone, Builder)]
pub struct WheelConfig {
    #[builder(default = "Prize Wheel".to_string())]
    pub title: String,

    // Assets
    #[builder(default = PathBuf::from("Wheel.png"))]
    pub image_path: PathBuf,
    /// Falls back to well-known system fonts when unset.
    pub font_path: Option<PathBuf>,

    // Labels
    #[builder(default = default_labels())]
    pub labels: Vec<String>,
    #[builder(default = "List of topics to: ".to_string())]
    pub result_prefix: String,

    // Spin physics
    #[builder(default = 0.002)]
    pub deceleration: f64,
    #[builder(default = 0.3)]
    pub min_speed: f64,
    #[builder(default = 0.5)]
    pub max_speed: f64,

    // Wheel geometry
    #[builder(default = 8)]
    pub slice_count: usize,
    #[builder(default = 270.0)]
    pub pointer_offset_deg: f64,
    #[builder(default = true)]
    pub show_pointer: bool,

    // Window configuration
    /// Wheel surface size used when the image never loads.
    #[builder(default = 400)]
    pub fallback_wheel_size: usize,
    #[builder(default = 400)]
    pub min_window_width: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Result surface
    #[builder(default = 120)]
    pub result_height: usize,
    #[builder(default = 20.0)]
    pub result_padding: f32,
    #[builder(default = 24.0)]
    pub line_height: f32,
    #[builder(default = 16.0)]
    pub font_size: f32,

    // Spin button
    #[builder(default = 56)]
    pub button_strip_height: usize,
    #[builder(default = 140)]
    pub button_width: usize,
    #[builder(default = "Spin".to_string())]
    pub button_label: String,

    // Colors
    #[builder(default = Color::new(0xff, 0xff, 0xff))]
    pub background_color: Color,
    #[builder(default = Color::new(0x33, 0x33, 0x33))]
    pub text_color: Color,
    #[builder(default = Color::new(0xd6, 0x3a, 0x2f))]
    pub pointer_color: Color,
    #[builder(default = Color::new(0x2f, 0x6f, 0xd6))]
    pub button_color: Color,
    #[builder(default = Color::new(0x9a, 0xa5, 0xb4))]
    pub button_busy_color: Color,
    #[builder(default = Color::new(0xff, 0xff, 0xff))]
    pub button_text_color: Color,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WheelConfig {
    pub fn speed_range(&self) -> std::ops::Range<f64> {
        let (lo, hi) = (
            self.min_speed.min(self.max_speed),
            self.min_speed.max(self.max_speed),
        );
        lo..hi
    }

    /// Rejects physics settings that would leave the wheel spinning forever
    /// or make the start speed undefined.
    pub fn validate(&self) -> Result<(), WheelError> {
        if !(self.deceleration.is_finite() && self.deceleration > 0.0) {
            return Err(WheelError::InvalidSetting {
                field: "deceleration",
                reason: format!("{} must be a finite number above zero", self.deceleration),
            });
        }
        for (field, speed) in [("min_speed", self.min_speed), ("max_speed", self.max_speed)] {
            if !(speed.is_finite() && speed >= 0.0) {
                return Err(WheelError::InvalidSetting {
                    field,
                    reason: format!("{speed} must be a finite, non-negative number"),
                });
            }
        }
        if self.slice_count == 0 {
            return Err(WheelError::InvalidSetting {
                field: "slice_count",
                reason: "wheel needs at least one wedge".to_string(),
            });
        }
        Ok(())
    }

    /// Label for a wedge, empty when the list is too short.
    pub fn label(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or("")
    }
}

// ============================================================================
// FILE OVERRIDES
// ============================================================================

/// Subset of [`WheelConfig`] that may be set from a TOML file. Anything left
/// out keeps its built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub title: Option<String>,
    pub image_path: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
    pub labels: Option<Vec<String>>,
    pub result_prefix: Option<String>,
    pub deceleration: Option<f64>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub slice_count: Option<usize>,
    pub pointer_offset_deg: Option<f64>,
    pub show_pointer: Option<bool>,
    pub max_framerate: Option<f64>,
    pub result_height: Option<usize>,
    pub line_height: Option<f32>,
    pub font_size: Option<f32>,
    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, WheelError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, WheelError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Builds a full config, with file values winning over defaults.
    pub fn into_config(self) -> Result<WheelConfig, WheelError> {
        let config = WheelConfig::builder()
            .maybe_title(self.title)
            .maybe_image_path(self.image_path)
            .maybe_font_path(self.font_path)
            .maybe_labels(self.labels)
            .maybe_result_prefix(self.result_prefix)
            .maybe_deceleration(self.deceleration)
            .maybe_min_speed(self.min_speed)
            .maybe_max_speed(self.max_speed)
            .maybe_slice_count(self.slice_count)
            .maybe_pointer_offset_deg(self.pointer_offset_deg)
            .maybe_show_pointer(self.show_pointer)
            .maybe_max_framerate(self.max_framerate)
            .maybe_result_height(self.result_height)
            .maybe_line_height(self.line_height)
            .maybe_font_size(self.font_size)
            .maybe_background_color(self.background_color)
            .maybe_text_color(self.text_color)
            .build();
        config.validate()?;
        Ok(config)
    }
}
