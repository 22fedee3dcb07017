//! Selection mask builders.
//!
//! Each tool turns a finished gesture into pixel membership:
//! - **Lasso**: closed polygon fill (`lasso.rs`)
//! - **Brush**: union of discs stamped along the stroke (`brush.rs`)
//! - **Rectangle**: implicit, the rectangle itself (`rectangle.rs`)
//!
//! Lasso and brush produce an explicit [`SelectionMask`] sized to the raster
//! (255 = selected, 0 = not selected).

use std::fmt;
use std::str::FromStr;

use crate::error::StagError;

pub mod brush;
pub mod lasso;
pub mod rectangle;

pub use brush::brush_mask;
pub use lasso::lasso_mask;
pub use rectangle::{rectangle_from_corners, PixelRect, RectangleRejection};

/// Gesture sample in raster pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Build points from a flat `[x0, y0, x1, y1, ...]` array. A trailing odd
/// value is ignored.
pub fn points_from_flat(coords: &[f32]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Active selection tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionTool {
    Lasso,
    Brush,
    Rectangle,
}

impl SelectionTool {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionTool::Lasso => "lasso",
            SelectionTool::Brush => "brush",
            SelectionTool::Rectangle => "rectangle",
        }
    }

    /// Suggested download name for this tool's export.
    pub fn export_filename(self) -> &'static str {
        match self {
            SelectionTool::Lasso => "lasso-selected-area.png",
            SelectionTool::Brush => "brush-selected-area.png",
            SelectionTool::Rectangle => "rectangle-selected-area.png",
        }
    }
}

impl fmt::Display for SelectionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionTool {
    type Err = StagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lasso" => Ok(SelectionTool::Lasso),
            "brush" => Ok(SelectionTool::Brush),
            "rectangle" | "rect" => Ok(SelectionTool::Rectangle),
            _ => Err(StagError::InvalidTool(s.to_string())),
        }
    }
}

/// Inclusive pixel bounds of a non-empty selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    #[inline]
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Dense selection mask the size of the raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionMask {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl SelectionMask {
    /// All-unselected mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Membership test; out-of-bounds coordinates are never selected.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] > 0
    }

    /// Select a pixel. Out-of-bounds writes are ignored; returns whether the
    /// pixel was newly selected.
    #[inline]
    pub fn insert(&mut self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let cell = &mut self.data[y * self.width + x];
        let fresh = *cell == 0;
        *cell = 255;
        fresh
    }

    pub fn pixel_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Tight bounds of the selected pixels, `None` for an empty mask.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;

        for (y, row) in self.data.chunks_exact(self.width.max(1)).enumerate() {
            let Some(first) = row.iter().position(|&v| v > 0) else {
                continue;
            };
            let last = row.iter().rposition(|&v| v > 0).unwrap_or(first);

            bounds = Some(match bounds {
                None => BoundingBox { min_x: first, min_y: y, max_x: last, max_y: y },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(first),
                    min_y: b.min_y,
                    max_x: b.max_x.max(last),
                    max_y: y,
                },
            });
        }

        bounds
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_parsing_and_filenames() {
        assert_eq!("lasso".parse::<SelectionTool>().unwrap(), SelectionTool::Lasso);
        assert_eq!("Brush".parse::<SelectionTool>().unwrap(), SelectionTool::Brush);
        assert_eq!("rectangle".parse::<SelectionTool>().unwrap(), SelectionTool::Rectangle);
        assert!("eraser".parse::<SelectionTool>().is_err());

        assert_eq!(SelectionTool::Lasso.export_filename(), "lasso-selected-area.png");
        assert_eq!(SelectionTool::Brush.export_filename(), "brush-selected-area.png");
        assert_eq!(SelectionTool::Rectangle.export_filename(), "rectangle-selected-area.png");
    }

    #[test]
    fn test_empty_mask_has_no_bounds() {
        let mask = SelectionMask::new(10, 10);
        assert!(mask.is_empty());
        assert_eq!(mask.bounds(), None);
        assert_eq!(mask.pixel_count(), 0);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut mask = SelectionMask::new(4, 4);
        assert!(mask.insert(1, 2));
        assert!(!mask.insert(1, 2));
        assert!(!mask.insert(4, 0)); // out of bounds
        assert_eq!(mask.pixel_count(), 1);
        assert!(mask.contains(1, 2));
        assert!(!mask.contains(2, 1));
    }

    #[test]
    fn test_bounds() {
        let mut mask = SelectionMask::new(10, 8);
        mask.insert(3, 1);
        mask.insert(7, 4);
        mask.insert(2, 6);
        let b = mask.bounds().unwrap();
        assert_eq!(b, BoundingBox { min_x: 2, min_y: 1, max_x: 7, max_y: 6 });
        assert_eq!((b.width(), b.height()), (6, 6));
    }

    #[test]
    fn test_points_from_flat() {
        let pts = points_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(pts, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    }
}
