// ============================================================================
// ASSET LOADING
// ============================================================================

use std::path::{Path, PathBuf};

use rusttype::Font;

use crate::error::WheelError;

/// Searched in order when no font is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Decoded wheel face, tightly packed RGBA8.
#[derive(Clone)]
pub struct WheelImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for WheelImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl WheelImage {
    pub fn load(path: &Path) -> Result<Self, WheelError> {
        let bytes = std::fs::read(path).map_err(|source| WheelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WheelError> {
        let rgba = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_rgba(width as usize, height as usize, rgba.into_raw()))
    }

    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGBA at integer coordinates, `None` outside the image.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub fn load_font(path: &Path) -> Result<Font<'static>, WheelError> {
    let bytes = std::fs::read(path).map_err(|source| WheelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| WheelError::InvalidFont(path.to_path_buf()))
}

/// Loads the configured font, or the first system font that parses.
pub fn resolve_font(configured: Option<&Path>) -> Result<Font<'static>, WheelError> {
    if let Some(path) = configured {
        return load_font(path);
    }
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .filter(|path| path.exists())
        .find_map(|path| match load_font(&path) {
            Ok(font) => {
                log::debug!("using system font {}", path.display());
                Some(font)
            }
            Err(err) => {
                log::debug!("skipping {}: {err}", path.display());
                None
            }
        })
        .ok_or(WheelError::NoFont)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, fill: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(fill));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("png encode");
        out.into_inner()
    }

    #[test]
    fn decodes_png_into_rgba() {
        let bytes = encode_png(3, 2, [10, 20, 30, 255]);
        let image = WheelImage::from_bytes(&bytes).expect("decode");
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(image.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.pixel(-1, 0), None);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = WheelImage::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, WheelError::Image(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = WheelImage::load(Path::new("/nonexistent/Wheel.png")).unwrap_err();
        match err {
            WheelError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/Wheel.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn configured_font_that_is_missing_fails() {
        let err = resolve_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(matches!(err, WheelError::Io { .. }));
    }
}
