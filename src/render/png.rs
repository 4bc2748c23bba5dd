//! PNG output for preprocessed images.
//!
//! Writes a preview of what the screen will show, with optional integer
//! upscaling so single-pixel detail stays visible.

use std::path::Path;

use image::imageops::{resize, FilterType};

use crate::error::{BeltscreenError, Result};
use crate::types::PixelBuffer;

/// Write a pixel buffer to a PNG file.
///
/// # Arguments
///
/// * `pixels` - The preprocessed pixels to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(pixels: &PixelBuffer, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);
    let img = pixels.to_image()?;

    let img = if scale > 1 {
        resize(
            &img,
            img.width() * scale,
            img.height() * scale,
            FilterType::Nearest,
        )
    } else {
        img
    };

    img.save(path).map_err(|e| BeltscreenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
