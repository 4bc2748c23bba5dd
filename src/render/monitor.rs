//! Preprocessing for monitor screens.
//!
//! Every output pixel is a colour the monitor palette contains, so the
//! synthesiser's palette lookups always hit exactly.

use crate::error::Result;
use crate::progress::{for_each_pixel, Progress};
use crate::types::adjust::{apply_contrast, clip, luminance, shift_hue};
use crate::types::{monitor_palette, PixelBuffer};

use super::{Adjustments, THRESHOLD_STRIDE};

/// Threshold, then brightness and inversion, then snap to a palette gray.
pub(super) fn black_white(
    pixels: &mut PixelBuffer,
    adjust: &Adjustments,
    progress: &mut dyn Progress,
) -> Result<()> {
    let palette = monitor_palette();
    let brightness = adjust.brightness();

    for_each_pixel(pixels.len(), Some(THRESHOLD_STRIDE), progress, |i| {
        let c = pixels.pixel(i);
        let lum = luminance(c.r as f64, c.g as f64, c.b as f64);
        let mut gray = if lum > adjust.threshold { 255.0 } else { 0.0 };
        if let Some(brightness) = brightness {
            gray = clip(gray + brightness);
        }
        if adjust.invert {
            gray = 255.0 - gray;
        }
        pixels.set_gray(i, palette.closest_gray(gray));
    })
}

/// Luminance with contrast, brightness and inversion, snapped to a palette gray.
pub(super) fn gray(
    pixels: &mut PixelBuffer,
    adjust: &Adjustments,
    progress: &mut dyn Progress,
) -> Result<()> {
    let palette = monitor_palette();
    let factor = adjust.contrast_factor();
    let brightness = adjust.brightness();

    for_each_pixel(pixels.len(), Some(THRESHOLD_STRIDE), progress, |i| {
        let c = pixels.pixel(i);
        let mut gray = luminance(c.r as f64, c.g as f64, c.b as f64);
        if let Some(factor) = factor {
            gray = apply_contrast(gray, factor);
        }
        if let Some(brightness) = brightness {
            gray = clip(gray + brightness);
        }
        if adjust.invert {
            gray = 255.0 - gray;
        }
        pixels.set_gray(i, palette.closest_gray(gray));
    })
}

/// Full-colour adjustments, then the Euclidean-nearest palette colour.
pub(super) fn colour_euclid(
    pixels: &mut PixelBuffer,
    adjust: &Adjustments,
    progress: &mut dyn Progress,
) -> Result<()> {
    let palette = monitor_palette();
    let factor = adjust.contrast_factor();
    let brightness = adjust.brightness();

    for_each_pixel(pixels.len(), None, progress, |i| {
        let c = pixels.pixel(i);
        let (r, g, b) = if adjust.hue_shift != 0 {
            shift_hue(c.r, c.g, c.b, adjust.hue_shift)
        } else {
            (c.r, c.g, c.b)
        };

        let mut rgb = [r as f64, g as f64, b as f64];
        if let Some(factor) = factor {
            rgb = rgb.map(|v| apply_contrast(v, factor));
        }
        if let Some(brightness) = brightness {
            rgb = rgb.map(|v| clip(v + brightness));
        }
        if adjust.invert {
            rgb = rgb.map(|v| 255.0 - v);
        }

        let index = palette.closest_palette(rgb);
        if let Some(snapped) = palette.get(index) {
            pixels.set_rgb(i, snapped.r, snapped.g, snapped.b);
        }
    })
}
