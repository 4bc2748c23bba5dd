//! Row-major RGBA pixel buffer.

use image::RgbaImage;

use crate::error::{BeltscreenError, Result};

use super::Colour;

/// A `width` x `height` grid of RGBA pixels, stored flat in row-major order.
///
/// Pixel `i` sits at column `i % width`, row `i / width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Fails unless `data` holds exactly `width * height` four-byte pixels
    /// and both dimensions are non-zero.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BeltscreenError::InvalidImage {
                message: format!("Image has zero dimensions ({}x{})", width, height),
                help: Some("Input image must have non-zero width and height".to_string()),
            });
        }

        if data.len() % 4 != 0 {
            return Err(BeltscreenError::InvalidImage {
                message: format!("Pixel data length {} is not a multiple of 4", data.len()),
                help: Some("Pixel data must be packed RGBA, one byte per channel".to_string()),
            });
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| BeltscreenError::InvalidImage {
                message: format!("Image dimensions {}x{} are too large", width, height),
                help: None,
            })?;

        if data.len() != expected {
            return Err(BeltscreenError::InvalidImage {
                message: format!(
                    "Pixel data holds {} pixels, expected {} for {}x{}",
                    data.len() / 4,
                    width * height,
                    width,
                    height
                ),
                help: Some("Check that width and height match the pixel data".to_string()),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by repeating one colour.
    pub fn filled(width: usize, height: usize, colour: Colour) -> Result<Self> {
        let data = colour.to_rgba().repeat(width.saturating_mul(height));
        Self::new(width, height, data)
    }

    /// Build a buffer from rows of colours. Rows must all have the same length.
    pub fn from_rows(rows: &[Vec<Colour>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());

        if rows.iter().any(|row| row.len() != width) {
            return Err(BeltscreenError::InvalidImage {
                message: "Pixel rows have differing lengths".to_string(),
                help: None,
            });
        }

        let data = rows
            .iter()
            .flat_map(|row| row.iter().flat_map(|c| c.to_rgba()))
            .collect();
        Self::new(width, height, data)
    }

    /// Copy an `image` buffer.
    pub fn from_image(img: &RgbaImage) -> Result<Self> {
        Self::new(
            img.width() as usize,
            img.height() as usize,
            img.as_raw().clone(),
        )
    }

    /// Convert back into an `image` buffer.
    pub fn to_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone()).ok_or_else(
            || BeltscreenError::InvalidImage {
                message: format!("Cannot convert {}x{} buffer to an image", self.width, self.height),
                help: None,
            },
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; construction rejects empty images.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Colour of pixel `i` in row-major order.
    pub fn pixel(&self, i: usize) -> Colour {
        let p = &self.data[i * 4..i * 4 + 4];
        Colour::new(p[0], p[1], p[2], p[3])
    }

    /// Colour at (column, row).
    pub fn get(&self, col: usize, row: usize) -> Option<Colour> {
        (col < self.width && row < self.height).then(|| self.pixel(row * self.width + col))
    }

    /// Red channel of pixel `i`.
    pub fn red(&self, i: usize) -> u8 {
        self.data[i * 4]
    }

    /// Overwrite the RGB channels of pixel `i`, leaving alpha untouched.
    pub fn set_rgb(&mut self, i: usize, r: u8, g: u8, b: u8) {
        self.data[i * 4..i * 4 + 3].copy_from_slice(&[r, g, b]);
    }

    /// Write the same value into R, G and B of pixel `i`.
    pub fn set_gray(&mut self, i: usize, level: u8) {
        self.set_rgb(i, level, level, level);
    }
}
