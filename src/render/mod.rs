//! Image preprocessing.
//!
//! Quantises a pixel buffer in place for the chosen render mode: belt
//! screens want two-level or continuous gray, monitor screens want colours
//! the monitor palette can actually show. Alpha is never written.

mod belt;
mod monitor;
mod png;

pub use png::write_png;

use log::debug;

use crate::error::Result;
use crate::progress::Progress;
use crate::types::adjust::contrast_factor;
use crate::types::{FormConfig, PixelBuffer, RenderMode};

/// Steps the thresholding modes let a host batch between yields.
const THRESHOLD_STRIDE: usize = 10;

/// Preprocessing knobs, clamped to their working ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    /// Luminance cut between black and white, `0..=255`.
    pub threshold: f64,
    /// `-255..=255`; zero disables.
    pub contrast: f64,
    /// `-255..=255`; zero disables.
    pub brightness: f64,
    /// Degrees, `-180..=180`; zero disables.
    pub hue_shift: i32,
    pub invert: bool,
}

impl Adjustments {
    pub fn from_form(form: &FormConfig) -> Self {
        Self {
            threshold: form.threshold.clamp(0, 255) as f64,
            contrast: form.contrast.clamp(-255, 255) as f64,
            brightness: form.brightness.clamp(-255, 255) as f64,
            hue_shift: form.hue_shift.clamp(-180, 180),
            invert: form.inversion_color,
        }
    }

    /// Contrast multiplier, or `None` when contrast is off.
    pub(crate) fn contrast_factor(&self) -> Option<f64> {
        (self.contrast != 0.0).then(|| contrast_factor(self.contrast))
    }

    pub(crate) fn brightness(&self) -> Option<f64> {
        (self.brightness != 0.0).then_some(self.brightness)
    }
}

impl Default for Adjustments {
    fn default() -> Self {
        Self::from_form(&FormConfig::default())
    }
}

/// Quantise `pixels` in place for `form.render_mode`.
///
/// An unrecognised render mode leaves the buffer untouched.
pub fn render_image(
    pixels: &mut PixelBuffer,
    form: &FormConfig,
    progress: &mut dyn Progress,
) -> Result<()> {
    let adjust = Adjustments::from_form(form);
    debug!(
        "preprocessing {}x{} image as {}",
        pixels.width(),
        pixels.height(),
        form.render_mode
    );

    match form.render_mode {
        RenderMode::Bw => belt::black_white(pixels, &adjust, progress),
        RenderMode::Gray => belt::gray(pixels, &adjust, progress),
        RenderMode::MonitorBw => monitor::black_white(pixels, &adjust, progress),
        RenderMode::MonitorGray => monitor::gray(pixels, &adjust, progress),
        RenderMode::MonitorColorEuclid => monitor::colour_euclid(pixels, &adjust, progress),
        RenderMode::Unknown => Ok(()),
    }
}
