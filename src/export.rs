//! Export orchestration: gesture -> mask -> transformed crop -> PNG.
//!
//! | Tool | Membership | Inside | Outside | Crop |
//! |------|------------|--------|---------|------|
//! | Lasso | winding-number polygon fill | grayscale, alpha kept | transparent | mask bounds |
//! | Brush | discs along the stroke | grayscale, alpha kept | transparent | mask bounds |
//! | Rectangle | the rectangle | grayscale, alpha 255 | n/a | rectangle |
//!
//! Insufficient input never fails: it yields [`ExportOutcome::Skipped`] and no
//! image. The source raster is only borrowed; every transform runs on a crop.

use std::fmt;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use ndarray::Array3;

use crate::config::ExportOptions;
use crate::error::Result;
use crate::filters::mask::{cutout_rgba_u8, opaque_grayscale_rgba_u8};
use crate::raster::Raster;
use crate::selection::{
    brush_mask, lasso_mask, rectangle_from_corners, BoundingBox, Point, RectangleRejection,
    SelectionMask, SelectionTool,
};

/// Why an export produced nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No gesture points at all
    EmptyGesture,
    /// Rectangle with zero width or height
    DegenerateRectangle,
    /// Rectangle gesture without exactly 4 corners
    MalformedRectangle,
    /// Lasso or brush mask selects no pixel
    EmptyMask,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::EmptyGesture => "gesture has no points",
            SkipReason::DegenerateRectangle => "rectangle has zero width or height",
            SkipReason::MalformedRectangle => "rectangle gesture needs exactly 4 corners",
            SkipReason::EmptyMask => "selection contains no pixels",
        };
        f.write_str(msg)
    }
}

impl From<RectangleRejection> for SkipReason {
    fn from(rejection: RectangleRejection) -> Self {
        match rejection {
            RectangleRejection::Malformed => SkipReason::MalformedRectangle,
            RectangleRejection::Degenerate => SkipReason::DegenerateRectangle,
        }
    }
}

/// Result of one export call.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportOutcome<T> {
    Exported(T),
    Skipped(SkipReason),
}

impl<T> ExportOutcome<T> {
    pub fn exported(self) -> Option<T> {
        match self {
            ExportOutcome::Exported(value) => Some(value),
            ExportOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ExportOutcome::Exported(_) => None,
            ExportOutcome::Skipped(reason) => Some(*reason),
        }
    }
}

/// Cropped, transformed pixels ready for encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedRaster {
    pub tool: SelectionTool,
    /// Region of the source raster the pixels came from
    pub bounds: BoundingBox,
    /// (height, width, 4) RGBA
    pub pixels: Array3<u8>,
}

impl ExportedRaster {
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn filename(&self) -> &'static str {
        self.tool.export_filename()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
            self.pixels[[y, x, 3]],
        ])
    }

    /// Row-major RGBA bytes.
    pub fn to_rgba_vec(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.to_rgba_vec(), self.width() as u32, self.height() as u32)
    }
}

/// PNG bytes plus the suggested download name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: &'static str,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Encode RGBA8 pixels as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(rgba, width, height, ExtendedColorType::Rgba8)?;
    Ok(png)
}

/// Build the selection for `tool` and return the transformed crop.
pub fn render_selection(
    raster: &Raster,
    tool: SelectionTool,
    points: &[Point],
    options: &ExportOptions,
) -> Result<ExportOutcome<ExportedRaster>> {
    if points.is_empty() {
        return Ok(skip(tool, SkipReason::EmptyGesture));
    }

    let (width, height) = (raster.width(), raster.height());

    let outcome = match tool {
        SelectionTool::Lasso => {
            let mask = lasso_mask(points, width, height, options.lasso.fill_rule);
            cutout(raster, tool, &mask)
        }
        SelectionTool::Brush => {
            options.brush.validate()?;
            let mask = brush_mask(points, options.brush.diameter, width, height);
            cutout(raster, tool, &mask)
        }
        SelectionTool::Rectangle => match rectangle_from_corners(points, width, height) {
            Ok(rect) => {
                let bounds = rect.bounds();
                let mut pixels = raster.crop(bounds);
                opaque_grayscale_rgba_u8(&mut pixels);
                ExportOutcome::Exported(ExportedRaster { tool, bounds, pixels })
            }
            Err(rejection) => skip(tool, rejection.into()),
        },
    };

    if let ExportOutcome::Exported(ref out) = outcome {
        tracing::debug!(
            %tool,
            width = out.width(),
            height = out.height(),
            x = out.bounds.min_x,
            y = out.bounds.min_y,
            "rendered selection"
        );
    }

    Ok(outcome)
}

/// Render the selection and encode it as PNG.
///
/// Identical inputs give byte-identical output.
pub fn export_selection(
    raster: &Raster,
    tool: SelectionTool,
    points: &[Point],
    options: &ExportOptions,
) -> Result<ExportOutcome<ExportedImage>> {
    let rendered = match render_selection(raster, tool, points, options)? {
        ExportOutcome::Exported(rendered) => rendered,
        ExportOutcome::Skipped(reason) => return Ok(ExportOutcome::Skipped(reason)),
    };

    let png = rendered.encode_png()?;
    tracing::info!(filename = rendered.filename(), bytes = png.len(), "exported selection");

    Ok(ExportOutcome::Exported(ExportedImage {
        filename: rendered.filename(),
        width: rendered.width() as u32,
        height: rendered.height() as u32,
        png,
    }))
}

fn cutout(
    raster: &Raster,
    tool: SelectionTool,
    mask: &SelectionMask,
) -> ExportOutcome<ExportedRaster> {
    let Some(bounds) = mask.bounds() else {
        return skip(tool, SkipReason::EmptyMask);
    };

    let mut pixels = raster.crop(bounds);
    cutout_rgba_u8(&mut pixels, mask, (bounds.min_x, bounds.min_y));
    ExportOutcome::Exported(ExportedRaster { tool, bounds, pixels })
}

fn skip<T>(tool: SelectionTool, reason: SkipReason) -> ExportOutcome<T> {
    tracing::debug!(%tool, %reason, "nothing to export");
    ExportOutcome::Skipped(reason)
}
