//! Colour adjustment maths shared by the preprocessing modes.
//!
//! Channel values are carried as `f64` in `[0, 255]` between steps and only
//! rounded to bytes when written back into a pixel buffer.

use palette::{IntoColor, Srgb};

type Hsl = palette::Hsl<palette::encoding::Srgb, f64>;

const GAMMA: f64 = 2.2;
const LUMA_R: f64 = 0.2973;
const LUMA_G: f64 = 0.6274;
const LUMA_B: f64 = 0.0753;

/// Gamma-correct luminance of an RGB triple.
///
/// Achromatic input returns its own level.
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    (r.powf(GAMMA) * LUMA_R + g.powf(GAMMA) * LUMA_G + b.powf(GAMMA) * LUMA_B).powf(1.0 / GAMMA)
}

/// Multiplier for a contrast setting in `[-255, 255]`.
pub fn contrast_factor(contrast: f64) -> f64 {
    (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Stretch a channel around mid-gray by `factor`, clipped to the byte range.
pub fn apply_contrast(value: f64, factor: f64) -> f64 {
    clip((value - 128.0) * factor + 128.0)
}

/// Clamp to `[0, 255]`.
pub fn clip(value: f64) -> f64 {
    value.clamp(0.0, 255.0)
}

/// Round and clamp to a byte. Halves round to even.
pub fn to_byte(value: f64) -> u8 {
    clip(value).round_ties_even() as u8
}

/// Convert RGB to (hue degrees, saturation %, lightness %), all rounded.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let rgb: Srgb<f64> = Srgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let hsl: Hsl = rgb.into_color();

    let h = hsl.hue.into_positive_degrees().round() as u16;
    let s = (hsl.saturation.clamp(0.0, 1.0) * 100.0).round() as u8;
    let l = (hsl.lightness.clamp(0.0, 1.0) * 100.0).round() as u8;
    (h, s, l)
}

/// Convert (hue degrees, saturation %, lightness %) back to RGB.
pub fn hsl_to_rgb(h: u16, s: u8, l: u8) -> (u8, u8, u8) {
    let hsl = Hsl::new(
        h as f64 % 360.0,
        (s as f64 / 100.0).clamp(0.0, 1.0),
        (l as f64 / 100.0).clamp(0.0, 1.0),
    );
    let rgb: Srgb<f64> = hsl.into_color();

    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    (channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

/// Rotate the hue of an RGB colour by `shift` degrees.
pub fn shift_hue(r: u8, g: u8, b: u8, shift: i32) -> (u8, u8, u8) {
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let h = (h as i32 + shift + 360).rem_euclid(360) as u16;
    hsl_to_rgb(h, s, l)
}
