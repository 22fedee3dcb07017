//! Brush selection: union of discs stamped along a stroke.
//!
//! The stroke is resampled every `diameter / 2` pixels so that consecutive
//! discs overlap even when the pointer moved fast between samples. Stamps
//! write into a dense mask, so overlapping discs are counted once.

use super::{Point, SelectionMask};

/// Resample a polyline into disc centers spaced at most `diameter / 2` apart,
/// keeping only centers whose disc can reach a `width` x `height` raster.
///
/// Each segment is divided into `ceil(distance / (diameter / 2))` steps, both
/// endpoints included. A zero-length segment contributes its start point
/// once. Segments are clipped to the raster grown by the radius before any
/// center is generated, so the output stays proportional to the raster even
/// when samples lie far off-canvas.
pub fn stroke_centers(points: &[Point], diameter: f32, width: usize, height: usize) -> Vec<Point> {
    let step = diameter as f64 / 2.0;
    if points.len() < 2 || !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let window = Window::around(width, height, step);
    let mut centers = Vec::new();
    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        if !a.x.is_finite() || !a.y.is_finite() || !b.x.is_finite() || !b.y.is_finite() {
            continue;
        }

        let (ax, ay) = (a.x as f64, a.y as f64);
        let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
        let steps = (dx.hypot(dy) / step).ceil();

        if steps < 1.0 {
            if window.contains(ax, ay) {
                centers.push(a);
            }
            continue;
        }

        let Some((t0, t1)) = window.clip(ax, ay, dx, dy) else {
            continue;
        };
        let first = (t0 * steps).ceil() as u64;
        let last = (t1 * steps).floor() as u64;
        centers.extend((first..=last).map(|j| {
            let j = j as f64;
            Point::new((ax + dx * j / steps) as f32, (ay + dy * j / steps) as f32)
        }));
        tracing::trace!(steps, first, last, "resampled stroke segment");
    }

    centers
}

/// Region where a disc center can still touch a raster pixel, with one
/// pixel of slack for rounding in the clip parameters.
#[derive(Clone, Copy, Debug)]
struct Window {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Window {
    fn around(width: usize, height: usize, radius: f64) -> Self {
        let pad = radius + 1.0;
        Self {
            min_x: -pad,
            min_y: -pad,
            max_x: width as f64 - 1.0 + pad,
            max_y: height as f64 - 1.0 + pad,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Parameter range `[t0, t1]` of `(x, y) + t * (dx, dy)`, `t` in `[0, 1]`,
    /// that lies inside the window (Liang-Barsky).
    fn clip(&self, x: f64, y: f64, dx: f64, dy: f64) -> Option<(f64, f64)> {
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        let edges = [
            (-dx, x - self.min_x),
            (dx, self.max_x - x),
            (-dy, y - self.min_y),
            (dy, self.max_y - y),
        ];

        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((t0, t1))
    }
}

/// Build a brush mask for a `width` x `height` raster.
///
/// Fewer than 2 samples or a non-positive diameter give an empty mask.
pub fn brush_mask(points: &[Point], diameter: f32, width: usize, height: usize) -> SelectionMask {
    let mut mask = SelectionMask::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let centers = stroke_centers(points, diameter, width, height);
    for &center in &centers {
        stamp_disc(&mut mask, center, diameter);
    }

    tracing::debug!(
        samples = points.len(),
        centers = centers.len(),
        diameter,
        selected = mask.pixel_count(),
        "built brush mask"
    );

    mask
}

/// Select every pixel within `diameter / 2` of `center`, clipped to the mask.
pub fn stamp_disc(mask: &mut SelectionMask, center: Point, diameter: f32) {
    if !center.x.is_finite() || !center.y.is_finite() {
        return;
    }

    let radius = diameter / 2.0;
    let r_sq = radius * radius;
    let reach = radius.floor();

    let x_start = (center.x - reach).ceil().max(0.0);
    let x_end = (center.x + reach).floor().min(mask.width() as f32 - 1.0);
    let y_start = (center.y - reach).ceil().max(0.0);
    let y_end = (center.y + reach).floor().min(mask.height() as f32 - 1.0);
    if x_end < x_start || y_end < y_start {
        return;
    }

    for py in y_start as usize..=y_end as usize {
        let dy = py as f32 - center.y;
        for px in x_start as usize..=x_end as usize {
            let dx = px as f32 - center.x;
            if dx * dx + dy * dy <= r_sq {
                mask.insert(px, py);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(cx: i32, cy: i32, diameter: f32, width: usize, height: usize) -> SelectionMask {
        let r = diameter / 2.0;
        let mut mask = SelectionMask::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let (dx, dy) = ((x - cx) as f32, (y - cy) as f32);
                if dx * dx + dy * dy <= r * r {
                    mask.insert(x as usize, y as usize);
                }
            }
        }
        mask
    }

    #[test]
    fn test_stationary_stroke_is_single_disc() {
        let p = Point::new(10.0, 10.0);
        let mask = brush_mask(&[p, p], 6.0, 30, 30);

        assert_eq!(mask, disc(10, 10, 6.0, 30, 30));
        // Lattice points within radius 3
        assert_eq!(mask.pixel_count(), 29);
    }

    #[test]
    fn test_disc_clipped_at_corner() {
        let p = Point::new(0.0, 0.0);
        let mask = brush_mask(&[p, p], 6.0, 20, 20);

        assert_eq!(mask, disc(0, 0, 6.0, 20, 20));
        assert_eq!(mask.pixel_count(), 11);
    }

    #[test]
    fn test_fast_stroke_has_no_gaps() {
        let pts = [Point::new(5.0, 20.0), Point::new(95.0, 20.0)];
        let mask = brush_mask(&pts, 10.0, 120, 40);

        for x in 5..=95 {
            for y in 16..=24 {
                assert!(mask.contains(x, y), "gap at ({}, {})", x, y);
            }
        }

        let b = mask.bounds().unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (0, 100, 15, 25));
    }

    #[test]
    fn test_overlapping_stamps_are_a_set() {
        let a = Point::new(20.0, 20.0);
        let b = Point::new(40.0, 20.0);
        let once = brush_mask(&[a, b], 8.0, 64, 64);
        let back_and_forth = brush_mask(&[a, b, a, b], 8.0, 64, 64);
        assert_eq!(once, back_and_forth);
    }

    #[test]
    fn test_too_few_samples() {
        assert!(brush_mask(&[], 30.0, 50, 50).is_empty());
        assert!(brush_mask(&[Point::new(10.0, 10.0)], 30.0, 50, 50).is_empty());
    }

    #[test]
    fn test_invalid_diameter() {
        let pts = [Point::new(1.0, 1.0), Point::new(5.0, 5.0)];
        assert!(brush_mask(&pts, 0.0, 10, 10).is_empty());
        assert!(brush_mask(&pts, -4.0, 10, 10).is_empty());
    }

    #[test]
    fn test_stroke_centers_spacing() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let centers = stroke_centers(&pts, 4.0, 20, 20);
        // ceil(10 / 2) = 5 steps, 6 centers
        assert_eq!(centers.len(), 6);
        assert_eq!(centers[0], Point::new(0.0, 0.0));
        assert_eq!(centers[5], Point::new(10.0, 0.0));
        for pair in centers.windows(2) {
            assert!(pair[0].distance(pair[1]) <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_stroke_leaving_canvas() {
        let pts = [Point::new(5.0, 5.0), Point::new(-50.0, 5.0)];
        let mask = brush_mask(&pts, 6.0, 20, 20);
        let b = mask.bounds().unwrap();
        assert_eq!(b.min_x, 0);
        assert_eq!(b.max_x, 8);
    }

    #[test]
    fn test_far_sample_only_resamples_near_raster() {
        let pts = [Point::new(10.0, 10.0), Point::new(1e12, 10.0)];
        let centers = stroke_centers(&pts, 30.0, 50, 50);

        // Step 15 along x: 10, 25, 40, 55 reach the raster, 70 does not
        assert_eq!(centers.len(), 4);
        assert_eq!(centers[0], Point::new(10.0, 10.0));
        assert!(centers.iter().all(|c| c.x < 66.0));
    }

    #[test]
    fn test_huge_segment_keeps_on_canvas_start() {
        let pts = [Point::new(10.0, 10.0), Point::new(1e30, 10.0)];
        let mask = brush_mask(&pts, 30.0, 50, 50);

        assert!(mask.contains(10, 10));
        assert!(mask.contains(0, 10));
        assert!(mask.contains(49, 10));
    }

    #[test]
    fn test_segment_crossing_raster_from_far_away() {
        let far = [Point::new(-1e9, 20.0), Point::new(1e9, 20.0)];
        let mask = brush_mask(&far, 10.0, 40, 40);

        for x in 0..40 {
            assert!(mask.contains(x, 20), "gap at ({}, 20)", x);
        }
        assert!(!mask.contains(5, 10));
    }

    #[test]
    fn test_stroke_entirely_off_canvas() {
        let pts = [Point::new(-500.0, -500.0), Point::new(-100.0, -300.0)];
        assert!(stroke_centers(&pts, 10.0, 50, 50).is_empty());
        assert!(brush_mask(&pts, 10.0, 50, 50).is_empty());
    }
}
