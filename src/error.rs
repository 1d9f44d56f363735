use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode wheel image: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0} is not a usable font")]
    InvalidFont(PathBuf),
    #[error("no font found; pass one with --font")]
    NoFont,
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid {field}: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: String,
    },
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Surface(#[from] pixels::Error),
}
