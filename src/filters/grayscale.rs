//! Grayscale conversion filter (channel average).
//!
//! Selected pixels are exported as R = G = B = round((R + G + B) / 3), with
//! alpha left untouched. The mask policies apply this per pixel lane.

use ndarray::ArrayViewMut1;

/// Rounded mean of the three color channels.
///
/// `(sum + 1) / 3` rounds to nearest; a sum never lands on a half.
#[inline]
pub fn average_gray(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16 + 1) / 3) as u8
}

/// Replace the color channels of one RGB/RGBA pixel lane with its average.
#[inline]
pub fn grayscale_pixel(mut pixel: ArrayViewMut1<u8>) {
    if pixel.len() < 3 {
        return;
    }
    let gray = average_gray(pixel[0], pixel[1], pixel[2]);
    pixel[0] = gray;
    pixel[1] = gray;
    pixel[2] = gray;
}
