//! Selection-driven pixel policies applied to a cropped RGBA buffer.
//!
//! Both policies work in place on a private crop, never on the source, and run
//! in parallel with rayon (each pixel lane is written by exactly one task).

use ndarray::{Array3, Axis, Zip};

use super::grayscale::grayscale_pixel;
use crate::selection::SelectionMask;

/// Cutout policy for lasso and brush exports.
///
/// `crop` covers the raster region starting at `origin` (x, y). Pixels whose
/// raster position is in `mask` are grayscaled with their alpha kept; all
/// others become fully transparent black.
pub fn cutout_rgba_u8(crop: &mut Array3<u8>, mask: &SelectionMask, origin: (usize, usize)) {
    let (origin_x, origin_y) = origin;

    Zip::indexed(crop.lanes_mut(Axis(2))).par_for_each(|(y, x), mut pixel| {
        if mask.contains(origin_x + x, origin_y + y) {
            grayscale_pixel(pixel);
        } else {
            pixel.fill(0);
        }
    });
}

/// Rectangle policy: every pixel grayscaled and made fully opaque.
pub fn opaque_grayscale_rgba_u8(crop: &mut Array3<u8>) {
    Zip::from(crop.lanes_mut(Axis(2))).par_for_each(|mut pixel| {
        grayscale_pixel(pixel.view_mut());
        if let Some(alpha) = pixel.get_mut(3) {
            *alpha = 255;
        }
    });
}
