//! Preprocessing for belt screens: two-level and continuous gray.

use crate::error::Result;
use crate::progress::{for_each_pixel, Progress};
use crate::types::adjust::{apply_contrast, clip, luminance, to_byte};
use crate::types::PixelBuffer;

use super::{Adjustments, THRESHOLD_STRIDE};

fn pixel_luminance(pixels: &PixelBuffer, i: usize) -> f64 {
    let c = pixels.pixel(i);
    luminance(c.r as f64, c.g as f64, c.b as f64)
}

/// Threshold luminance to pure black or white. Inversion happens before
/// the threshold.
pub(super) fn black_white(
    pixels: &mut PixelBuffer,
    adjust: &Adjustments,
    progress: &mut dyn Progress,
) -> Result<()> {
    for_each_pixel(pixels.len(), Some(THRESHOLD_STRIDE), progress, |i| {
        let mut gray = pixel_luminance(pixels, i);
        if adjust.invert {
            gray = 255.0 - gray;
        }
        pixels.set_gray(i, if gray > adjust.threshold { 255 } else { 0 });
    })
}

/// Luminance with contrast, brightness and inversion applied in that order.
pub(super) fn gray(
    pixels: &mut PixelBuffer,
    adjust: &Adjustments,
    progress: &mut dyn Progress,
) -> Result<()> {
    let factor = adjust.contrast_factor();
    let brightness = adjust.brightness();

    for_each_pixel(pixels.len(), None, progress, |i| {
        let mut gray = pixel_luminance(pixels, i);
        if let Some(factor) = factor {
            gray = apply_contrast(gray, factor);
        }
        if let Some(brightness) = brightness {
            gray = clip(gray + brightness);
        }
        if adjust.invert {
            gray = 255.0 - gray;
        }
        pixels.set_gray(i, to_byte(gray));
    })
}
