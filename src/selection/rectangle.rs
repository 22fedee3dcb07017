//! Rectangle selection.
//!
//! The gesture carries four corners in drag order: start, (end.x, start.y),
//! end, (start.x, end.y). Only start and end are used. No mask is built; the
//! rectangle itself is the selection.

use super::{BoundingBox, Point};

/// Integer pixel rectangle inside the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    /// Inclusive bounds; width and height are always non-zero.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.x,
            min_y: self.y,
            max_x: self.x + self.width - 1,
            max_y: self.y + self.height - 1,
        }
    }
}

/// Why a rectangle gesture cannot be exported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectangleRejection {
    /// Gesture does not have exactly 4 corners
    Malformed,
    /// Zero width or height, possibly after clipping to the raster
    Degenerate,
}

/// Resolve drag corners into a pixel rectangle clipped to a `width` x `height`
/// raster.
pub fn rectangle_from_corners(
    points: &[Point],
    width: usize,
    height: usize,
) -> Result<PixelRect, RectangleRejection> {
    let [start, _, end, _] = points else {
        return Err(RectangleRejection::Malformed);
    };

    let (rect_x, rect_w) = span(start.x, end.x).ok_or(RectangleRejection::Degenerate)?;
    let (rect_y, rect_h) = span(start.y, end.y).ok_or(RectangleRejection::Degenerate)?;

    let (x, w) = clip(rect_x, rect_w, width).ok_or(RectangleRejection::Degenerate)?;
    let (y, h) = clip(rect_y, rect_h, height).ok_or(RectangleRejection::Degenerate)?;

    Ok(PixelRect { x, y, width: w, height: h })
}

/// Origin (floor of the smaller coordinate) and truncated extent of a drag.
fn span(a: f32, b: f32) -> Option<(f64, f64)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let (a, b) = (a as f64, b as f64);
    let origin = a.min(b).floor();
    let extent = (b - a).abs().trunc();
    (extent > 0.0).then_some((origin, extent))
}

/// Clip `[origin, origin + extent)` to `[0, limit)`.
fn clip(origin: f64, extent: f64, limit: usize) -> Option<(usize, usize)> {
    let start = origin.max(0.0);
    let end = (origin + extent).min(limit as f64);
    (end > start).then(|| (start as usize, (end - start) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn test_drag_down_right() {
        let rect = rectangle_from_corners(&corners(10.0, 10.0, 50.0, 40.0), 100, 100).unwrap();
        assert_eq!(rect, PixelRect { x: 10, y: 10, width: 40, height: 30 });
        assert_eq!(rect.bounds(), BoundingBox { min_x: 10, min_y: 10, max_x: 49, max_y: 39 });
    }

    #[test]
    fn test_drag_up_left() {
        let rect = rectangle_from_corners(&corners(50.0, 40.0, 10.0, 10.0), 100, 100).unwrap();
        assert_eq!(rect, PixelRect { x: 10, y: 10, width: 40, height: 30 });
    }

    #[test]
    fn test_zero_width_rejected() {
        assert_eq!(
            rectangle_from_corners(&corners(10.0, 10.0, 10.0, 40.0), 100, 100),
            Err(RectangleRejection::Degenerate)
        );
        assert_eq!(
            rectangle_from_corners(&corners(10.0, 10.0, 40.0, 10.5), 100, 100),
            Err(RectangleRejection::Degenerate)
        );
    }

    #[test]
    fn test_wrong_corner_count() {
        let pts = corners(0.0, 0.0, 5.0, 5.0);
        assert_eq!(
            rectangle_from_corners(&pts[..3], 10, 10),
            Err(RectangleRejection::Malformed)
        );
        assert_eq!(rectangle_from_corners(&[], 10, 10), Err(RectangleRejection::Malformed));
    }

    #[test]
    fn test_clipped_to_raster() {
        let rect = rectangle_from_corners(&corners(90.0, 90.0, 120.0, 130.0), 100, 100).unwrap();
        assert_eq!(rect, PixelRect { x: 90, y: 90, width: 10, height: 10 });

        assert_eq!(
            rectangle_from_corners(&corners(150.0, 150.0, 160.0, 160.0), 100, 100),
            Err(RectangleRejection::Degenerate)
        );
    }

    #[test]
    fn test_extreme_corners() {
        assert_eq!(
            rectangle_from_corners(&corners(1e18, 0.0, 1e19, 10.0), 100, 100),
            Err(RectangleRejection::Degenerate)
        );

        let rect = rectangle_from_corners(&corners(-1e30, -5.0, f32::MAX, 20.0), 100, 100).unwrap();
        assert_eq!(rect, PixelRect { x: 0, y: 0, width: 100, height: 20 });
    }
}
