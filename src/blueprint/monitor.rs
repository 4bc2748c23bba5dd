//! Flow monitor screens.
//!
//! Each pixel becomes a monitor whose indicator shows the pixel's palette
//! colour, paired with a belt at the same spot for it to watch. The pair
//! is emitted monitor first.

use crate::error::Result;
use crate::progress::{for_each_pixel, Progress};
use crate::types::{monitor_palette, Colour, FormConfig, PixelBuffer};

use super::builder::BuildingList;
use super::building::Building;
use super::geometry::ScreenGeometry;

fn screen(
    pixels: &PixelBuffer,
    form: &FormConfig,
    progress: &mut dyn Progress,
    colour_index: impl Fn(Colour) -> usize,
) -> Result<Vec<Building>> {
    let geometry = ScreenGeometry::flat(pixels.width(), pixels.height(), form.space, form.z);
    let total = pixels.len();
    let mut list = BuildingList::new(total * 2);

    for_each_pixel(total, None, progress, |i| {
        let (x, y) = geometry.logical(i);
        let offset = geometry.place(x, y);
        let colour = colour_index(pixels.pixel(i));

        list.push(|idx| Building::monitor(idx, offset, colour));
        list.push(|idx| Building::belt(idx, offset, 0.0, None));
    })?;

    list.seal()
}

/// Monitors showing the palette gray nearest each pixel's red channel.
pub fn gray_screen(
    pixels: &PixelBuffer,
    form: &FormConfig,
    progress: &mut dyn Progress,
) -> Result<Vec<Building>> {
    let palette = monitor_palette();
    screen(pixels, form, progress, |c| palette.closest_gray_index(c.r))
}

/// Monitors showing each pixel's exact palette colour, or the nearest one.
pub fn colour_screen(
    pixels: &PixelBuffer,
    form: &FormConfig,
    progress: &mut dyn Progress,
) -> Result<Vec<Building>> {
    let palette = monitor_palette();
    screen(pixels, form, progress, |c| {
        let rgb = Colour::rgb(c.r, c.g, c.b);
        palette
            .hex_index(&rgb.to_hex())
            .unwrap_or_else(|| palette.closest_palette(rgb))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::building::Offset;
    use crate::progress::Immediate;
    use crate::types::palette::DARKEST_GRAY;

    #[test]
    fn test_gray_screen_single_black_pixel() {
        let pixels = PixelBuffer::filled(1, 1, Colour::BLACK).unwrap();
        let buildings = gray_screen(&pixels, &FormConfig::default(), &mut Immediate).unwrap();

        assert_eq!(buildings.len(), 2);
        assert!(buildings[0].is_monitor());
        assert!(buildings[1].is_belt());

        let expected = monitor_palette().gray_index(DARKEST_GRAY).unwrap();
        assert_eq!(buildings[0].colour_index(), Some(expected as i32));
        assert_eq!(buildings[0].offset(), Offset::default());
        assert_eq!(buildings[1].offset(), Offset::default());
    }

    #[test]
    fn test_pairs_share_offsets() {
        let pixels = PixelBuffer::filled(3, 2, Colour::gray(136)).unwrap();
        let form = FormConfig {
            space: 2.0,
            z: 1.0,
            ..FormConfig::default()
        };
        let buildings = gray_screen(&pixels, &form, &mut Immediate).unwrap();

        assert_eq!(buildings.len(), 12);
        for pair in buildings.chunks(2) {
            assert!(pair[0].is_monitor() && pair[1].is_belt());
            assert_eq!(pair[0].local_offset, pair[1].local_offset);
            assert_eq!(pair[1].next(), None);
            assert_eq!(pair[1].tilt, 0.0);
        }
        // raster 0 is the rightmost logical column
        assert_eq!(buildings[0].offset(), Offset::new(4.0, 0.0, 1.0));
        assert_eq!(buildings[10].offset(), Offset::new(0.0, 2.0, 1.0));
    }

    #[test]
    fn test_colour_screen_exact_and_nearest() {
        let pixels =
            PixelBuffer::from_rows(&[vec![Colour::rgb(255, 0, 0), Colour::rgb(254, 1, 1)]]).unwrap();
        let buildings = colour_screen(&pixels, &FormConfig::default(), &mut Immediate).unwrap();

        let red = monitor_palette().index_of(Colour::rgb(255, 0, 0)).unwrap() as i32;
        assert_eq!(buildings[0].colour_index(), Some(red));
        assert_eq!(buildings[2].colour_index(), Some(red));
    }

    #[test]
    fn test_colour_screen_ignores_alpha() {
        let pixels = PixelBuffer::filled(1, 1, Colour::new(255, 0, 0, 10)).unwrap();
        let buildings = colour_screen(&pixels, &FormConfig::default(), &mut Immediate).unwrap();

        let red = monitor_palette().index_of(Colour::rgb(255, 0, 0)).unwrap() as i32;
        assert_eq!(buildings[0].colour_index(), Some(red));
    }
}
