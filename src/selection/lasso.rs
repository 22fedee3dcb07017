//! Lasso selection: closed polygon fill.
//!
//! Pixels are sampled at their centers (x + 0.5, y + 0.5) and tested with a
//! winding number. Edges are half-open in y so a sample lying exactly on a
//! shared edge belongs to one side only.

use rayon::prelude::*;

use super::{Point, SelectionMask};
use crate::config::FillRule;

/// Build a lasso mask for a `width` x `height` raster.
///
/// The polygon is implicitly closed. Fewer than 3 distinct vertices or
/// non-finite coordinates give an empty mask, and a polygon that encloses no
/// area winds around no pixel center. Self-crossing lobes are filled
/// independently, so lobes of opposite orientation do not cancel.
pub fn lasso_mask(
    points: &[Point],
    width: usize,
    height: usize,
    fill_rule: FillRule,
) -> SelectionMask {
    let mut mask = SelectionMask::new(width, height);

    if width == 0 || height == 0 || is_degenerate(points) {
        return mask;
    }

    let (min_x, min_y, max_x, max_y) = points.iter().fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    );

    // Pixel columns/rows whose centers fall inside the vertex bounds
    let Some((col_start, col_end)) = center_range(min_x, max_x, width) else {
        return mask;
    };
    let Some((row_start, row_end)) = center_range(min_y, max_y, height) else {
        return mask;
    };

    mask.data
        .par_chunks_mut(width)
        .enumerate()
        .skip(row_start)
        .take(row_end - row_start + 1)
        .for_each(|(y, row)| {
            let cy = y as f32 + 0.5;
            for (x, cell) in row.iter_mut().enumerate().take(col_end + 1).skip(col_start) {
                let cx = x as f32 + 0.5;
                let winding = winding_number(points, cx, cy);
                let inside = match fill_rule {
                    FillRule::NonZero => winding != 0,
                    FillRule::EvenOdd => winding % 2 != 0,
                };
                if inside {
                    *cell = 255;
                }
            }
        });

    tracing::debug!(
        vertices = points.len(),
        selected = mask.pixel_count(),
        ?fill_rule,
        "built lasso mask"
    );

    mask
}

/// Winding number of the closed polygon around (px, py).
pub fn winding_number(points: &[Point], px: f32, py: f32) -> i32 {
    let n = points.len();
    let mut winding = 0;

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];

        if a.y <= py {
            // Upward crossing with the sample strictly left of the edge
            if b.y > py && is_left(a, b, px, py) > 0.0 {
                winding += 1;
            }
        } else if b.y <= py && is_left(a, b, px, py) < 0.0 {
            winding -= 1;
        }
    }

    winding
}

#[inline]
fn is_left(a: Point, b: Point, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (px - a.x) * (b.y - a.y)
}

fn is_degenerate(points: &[Point]) -> bool {
    if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return true;
    }

    let mut distinct: Vec<Point> = Vec::with_capacity(3);
    for &p in points {
        if !distinct.contains(&p) {
            distinct.push(p);
            if distinct.len() == 3 {
                break;
            }
        }
    }

    distinct.len() < 3
}

/// Inclusive index range of pixels whose centers lie in [lo, hi], clipped to
/// `0..len`.
fn center_range(lo: f32, hi: f32, len: usize) -> Option<(usize, usize)> {
    let start = (lo - 0.5).ceil().max(0.0);
    let end = (hi - 0.5).floor().min(len as f32 - 1.0);
    if end < start {
        return None;
    }
    Some((start as usize, end as usize))
}
