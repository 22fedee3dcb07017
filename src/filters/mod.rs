//! Pixel filters used by the export pipeline.
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! - **Grayscale**: channel-average conversion (`grayscale.rs`)
//! - **Mask policies**: cutout and opaque-rectangle transforms over a crop (`mask.rs`)

pub mod grayscale;
pub mod mask;
