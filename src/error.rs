//! Error types for raster construction, upload validation and export.
//!
//! Insufficient selection input is not an error: the export pipeline reports
//! it as [`crate::export::ExportOutcome::Skipped`]. Everything here is a real
//! failure that callers are expected to surface.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StagError>;

#[derive(Debug, Error)]
pub enum StagError {
    /// Declared media type is not PNG or JPEG
    #[error("unsupported media type: {0} (expected image/png or image/jpeg)")]
    UnsupportedMediaType(String),

    #[error("invalid pixel data length: expected {expected}, got {actual}")]
    InvalidRaster { expected: usize, actual: usize },

    #[error("raster must have 4 (RGBA) channels, got {0}")]
    InvalidChannels(usize),

    #[error("brush diameter must be a positive finite number, got {0}")]
    InvalidBrushSize(f32),

    #[error("brush opacity must be within 0.0-1.0, got {0}")]
    InvalidBrushOpacity(f32),

    #[error("unknown selection tool: {0}")]
    InvalidTool(String),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}
