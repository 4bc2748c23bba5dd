//! Belt screens.
//!
//! One belt per pixel, tilted to show the pixel's shade, chained into a
//! serpentine: even logical columns flow bottom-up, odd columns top-down,
//! and with `connect_belt` each column's last belt feeds the next column.

use log::debug;

use crate::error::Result;
use crate::progress::{for_each_pixel, Progress};
use crate::types::{FormConfig, PixelBuffer};

use super::builder::BuildingList;
use super::building::{Building, Offset};
use super::geometry::ScreenGeometry;

/// Tilt of a belt showing white.
pub const TILT_WHITE: f32 = 0.0;
/// Tilt of a belt showing black.
pub const TILT_BLACK: f32 = 179.0;

/// Direction material flows through a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRun {
    /// Toward row 0. Used by even logical columns.
    BottomUp,
    /// Away from row 0. Used by odd logical columns.
    TopDown,
}

impl ColumnRun {
    pub fn of(x: usize) -> Self {
        if x % 2 == 0 {
            ColumnRun::BottomUp
        } else {
            ColumnRun::TopDown
        }
    }
}

/// Tilt for a binarised pixel.
pub fn black_white_tilt(red: u8) -> f32 {
    if red > 128 {
        TILT_WHITE
    } else {
        TILT_BLACK
    }
}

/// Tilt for a gray pixel, mapping 0..=255 linearly onto 179..=89.
pub fn gray_tilt(red: u8) -> f32 {
    179.0 - (red as f32 / 255.0 * 90.0).round()
}

/// Where the belt at raster index `index` outputs, or `None` if it ends
/// its chain.
///
/// A belt at the end of its column run wraps to the neighbouring raster
/// column in the same row when `connect` is set, unless it sits in the
/// last logical column.
pub fn serpentine_next(
    geometry: &ScreenGeometry,
    index: usize,
    connect: bool,
) -> Option<usize> {
    let (x, y) = geometry.logical(index);
    let width = geometry.width();
    let at_run_end = match ColumnRun::of(x) {
        ColumnRun::BottomUp => y == 0,
        ColumnRun::TopDown => y + 1 == geometry.height(),
    };

    if !at_run_end {
        return match ColumnRun::of(x) {
            ColumnRun::BottomUp => index.checked_sub(width),
            ColumnRun::TopDown => Some(index + width),
        };
    }

    if connect && x + 1 != width {
        index.checked_sub(1)
    } else {
        None
    }
}

fn push_input_port(list: &mut BuildingList, geometry: &ScreenGeometry, last: usize) -> Result<()> {
    list.flush_deferred()?;
    let port = Offset::new(-1.0, 0.0, geometry.z());
    let index = list.push(|i| Building::belt(i, port, TILT_WHITE, Some(last)));
    debug!("input port belt {} feeds belt {}", index, last);
    Ok(())
}

/// A binarised belt screen, optionally sharpening row boundaries.
///
/// Where a pixel's tilt differs from the pixel above it and
/// `fix_boundary` is set, two extra belts are spliced into the column's
/// chain between the two rows: the one nearer each row carries that row's
/// tilt, so the visible edge sits halfway between them.
pub fn black_white_screen(
    pixels: &PixelBuffer,
    form: &FormConfig,
    progress: &mut dyn Progress,
) -> Result<Vec<Building>> {
    let geometry = ScreenGeometry::from_form(pixels.width(), pixels.height(), form);
    let total = pixels.len();
    let width = pixels.width();
    let mut list = BuildingList::new(total);

    for_each_pixel(total, None, progress, |i| {
        let (x, y) = geometry.logical(i);
        let tilt = black_white_tilt(pixels.red(i));
        let mut next = serpentine_next(&geometry, i, form.connect_belt);

        if form.fix_boundary && y > 0 {
            let above = i - width;
            let above_tilt = black_white_tilt(pixels.red(above));

            if above_tilt != tilt {
                let first = list.next_deferred_index();
                let run = ColumnRun::of(x);

                // Chain order through the pair, and where it leads.
                let (lean, first_tilt, second_tilt, after) = match run {
                    ColumnRun::BottomUp => {
                        let after = next;
                        next = Some(first);
                        (1.0, tilt, above_tilt, after)
                    }
                    ColumnRun::TopDown => {
                        if let Some(b) = list.get_mut(above) {
                            b.set_next(Some(first));
                        }
                        (-1.0, above_tilt, tilt, Some(i))
                    }
                };

                list.push_deferred(|idx| {
                    Building::belt(idx, geometry.place_boundary(x, y, lean), first_tilt, Some(idx + 1))
                });
                list.push_deferred(|idx| {
                    Building::belt(idx, geometry.place_boundary(x, y, -lean), second_tilt, after)
                });
            }
        }

        list.push(|idx| Building::belt(idx, geometry.place(x, y), tilt, next));
    })?;

    debug!(
        "{} belts, {} boundary belts",
        list.next_index(),
        list.deferred_len()
    );

    if geometry.is_tilted() && form.add_input_port {
        push_input_port(&mut list, &geometry, total - 1)?;
    }

    list.seal()
}

/// A grayscale belt screen. Boundary sharpening does not apply.
pub fn gray_screen(
    pixels: &PixelBuffer,
    form: &FormConfig,
    progress: &mut dyn Progress,
) -> Result<Vec<Building>> {
    let geometry = ScreenGeometry::from_form(pixels.width(), pixels.height(), form);
    let total = pixels.len();
    let mut list = BuildingList::new(total);

    for_each_pixel(total, None, progress, |i| {
        let (x, y) = geometry.logical(i);
        let tilt = gray_tilt(pixels.red(i));
        let next = serpentine_next(&geometry, i, form.connect_belt);
        list.push(|idx| Building::belt(idx, geometry.place(x, y), tilt, next));
    })?;

    if geometry.is_tilted() && form.add_input_port {
        push_input_port(&mut list, &geometry, total - 1)?;
    }

    list.seal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Immediate;
    use crate::types::{Colour, GenerateMode, RenderMode};

    fn links(buildings: &[Building]) -> Vec<i32> {
        buildings.iter().map(|b| b.output_obj_idx).collect()
    }

    fn form(generate_mode: GenerateMode) -> FormConfig {
        FormConfig {
            generate_mode,
            render_mode: RenderMode::Bw,
            ..FormConfig::default()
        }
    }

    #[test]
    fn test_tilts() {
        assert_eq!(black_white_tilt(255), 0.0);
        assert_eq!(black_white_tilt(129), 0.0);
        assert_eq!(black_white_tilt(128), 179.0);
        assert_eq!(gray_tilt(0), 179.0);
        assert_eq!(gray_tilt(10), 175.0);
        assert_eq!(gray_tilt(200), 108.0);
        assert_eq!(gray_tilt(255), 89.0);
    }

    #[test]
    fn test_serpentine_unconnected() {
        let geo = ScreenGeometry::flat(2, 2, 1.0, 0.0);
        let next: Vec<_> = (0..4).map(|i| serpentine_next(&geo, i, false)).collect();
        assert_eq!(next, vec![Some(2), None, None, Some(1)]);
    }

    #[test]
    fn test_serpentine_connected() {
        let geo = ScreenGeometry::flat(3, 2, 1.0, 0.0);
        let next: Vec<_> = (0..6).map(|i| serpentine_next(&geo, i, true)).collect();
        // raster 0 is logical column 2 (even): its top wraps nowhere
        // raster 1 is column 1 (odd): runs down to raster 4, which wraps to raster 3
        // raster 2 is column 0 (even): its top wraps to raster 1
        assert_eq!(next, vec![None, Some(4), Some(1), Some(0), Some(3), Some(2)]);
    }

    #[test]
    fn test_serpentine_single_column_never_wraps() {
        let geo = ScreenGeometry::flat(1, 3, 1.0, 0.0);
        let next: Vec<_> = (0..3).map(|i| serpentine_next(&geo, i, true)).collect();
        assert_eq!(next, vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn test_black_white_screen_links_and_slots() {
        let pixels = PixelBuffer::filled(2, 2, Colour::WHITE).unwrap();
        let buildings =
            black_white_screen(&pixels, &form(GenerateMode::BeltHoriz), &mut Immediate).unwrap();

        assert_eq!(links(&buildings), vec![2, -1, -1, 1]);
        assert!(buildings.iter().all(|b| b.tilt == 0.0));
        for b in &buildings {
            assert_eq!(b.output_to_slot, if b.next().is_some() { 1 } else { 0 });
        }
    }

    #[test]
    fn test_fix_boundary_uniform_image_adds_nothing() {
        let pixels = PixelBuffer::filled(3, 3, Colour::BLACK).unwrap();
        let form = FormConfig {
            fix_boundary: true,
            ..form(GenerateMode::BeltHoriz)
        };
        let buildings = black_white_screen(&pixels, &form, &mut Immediate).unwrap();
        assert_eq!(buildings.len(), 9);
    }

    #[test]
    fn test_fix_boundary_even_column() {
        // one column, logical x = 0, runs bottom-up
        let pixels = PixelBuffer::from_rows(&[vec![Colour::WHITE], vec![Colour::BLACK]]).unwrap();
        let form = FormConfig {
            fix_boundary: true,
            ..form(GenerateMode::BeltHoriz)
        };
        let buildings = black_white_screen(&pixels, &form, &mut Immediate).unwrap();

        assert_eq!(buildings.len(), 4);
        // row 1 -> aux 2 -> aux 3 -> row 0
        assert_eq!(links(&buildings), vec![-1, 2, 3, 0]);
        assert_eq!(buildings[2].tilt, TILT_BLACK);
        assert_eq!(buildings[3].tilt, TILT_WHITE);
        assert_eq!(buildings[2].offset(), Offset::new(0.0, 0.625, 0.0));
        assert_eq!(buildings[3].offset(), Offset::new(0.0, 0.375, 0.0));
    }

    #[test]
    fn test_fix_boundary_odd_column() {
        // raster column 0 of two is logical x = 1, runs top-down
        let pixels = PixelBuffer::from_rows(&[
            vec![Colour::WHITE, Colour::WHITE],
            vec![Colour::BLACK, Colour::WHITE],
        ])
        .unwrap();
        let form = FormConfig {
            fix_boundary: true,
            ..form(GenerateMode::BeltHoriz)
        };
        let buildings = black_white_screen(&pixels, &form, &mut Immediate).unwrap();

        assert_eq!(buildings.len(), 6);
        // row 0 -> aux 4 -> aux 5 -> row 1
        assert_eq!(links(&buildings), vec![4, -1, -1, 1, 5, 2]);
        assert_eq!(buildings[4].tilt, TILT_WHITE);
        assert_eq!(buildings[5].tilt, TILT_BLACK);
        assert_eq!(buildings[4].offset(), Offset::new(1.0, 0.375, 0.0));
        assert_eq!(buildings[5].offset(), Offset::new(1.0, 0.625, 0.0));
    }

    #[test]
    fn test_input_port_on_vertical_screen() {
        let pixels = PixelBuffer::filled(2, 2, Colour::WHITE).unwrap();
        let form = FormConfig {
            add_input_port: true,
            z: 4.0,
            ..form(GenerateMode::BeltVerti)
        };
        let buildings = black_white_screen(&pixels, &form, &mut Immediate).unwrap();

        assert_eq!(buildings.len(), 5);
        let port = &buildings[4];
        assert_eq!(port.index, 4);
        assert_eq!(port.next(), Some(3));
        assert_eq!(port.offset(), Offset::new(-1.0, 0.0, 4.0));
    }

    #[test]
    fn test_input_port_ignored_on_flat_screen() {
        let pixels = PixelBuffer::filled(2, 2, Colour::WHITE).unwrap();
        let form = FormConfig {
            add_input_port: true,
            ..form(GenerateMode::BeltHoriz)
        };
        let buildings = gray_screen(&pixels, &form, &mut Immediate).unwrap();
        assert_eq!(buildings.len(), 4);
    }

    #[test]
    fn test_input_port_follows_boundary_belts() {
        let pixels = PixelBuffer::from_rows(&[vec![Colour::WHITE], vec![Colour::BLACK]]).unwrap();
        let form = FormConfig {
            fix_boundary: true,
            add_input_port: true,
            ..form(GenerateMode::BeltVerti)
        };
        let buildings = black_white_screen(&pixels, &form, &mut Immediate).unwrap();

        assert_eq!(buildings.len(), 5);
        assert_eq!(buildings[4].next(), Some(1));
    }

    #[test]
    fn test_gray_screen_ignores_fix_boundary() {
        let pixels = PixelBuffer::from_rows(&[
            vec![Colour::gray(10)],
            vec![Colour::gray(200)],
            vec![Colour::gray(255)],
        ])
        .unwrap();
        let form = FormConfig {
            fix_boundary: true,
            render_mode: RenderMode::Gray,
            ..form(GenerateMode::BeltHoriz)
        };
        let buildings = gray_screen(&pixels, &form, &mut Immediate).unwrap();

        let tilts: Vec<f32> = buildings.iter().map(|b| b.tilt).collect();
        assert_eq!(tilts, vec![175.0, 108.0, 89.0]);
        assert_eq!(links(&buildings), vec![-1, 0, 1]);
    }

    #[test]
    fn test_gray_screen_tilted_offsets() {
        let pixels = PixelBuffer::from_rows(&[
            vec![Colour::gray(255), Colour::gray(10)],
            vec![Colour::gray(200), Colour::gray(200)],
            vec![Colour::gray(10), Colour::gray(255)],
        ])
        .unwrap();
        let form = FormConfig {
            render_mode: RenderMode::Gray,
            angle: 60.0,
            space: 2.0,
            z: 1.0,
            add_input_port: true,
            ..form(GenerateMode::BeltVerti)
        };
        let buildings = gray_screen(&pixels, &form, &mut Immediate).unwrap();
        assert_eq!(buildings.len(), 7);

        let close = |a: Offset, b: Offset| {
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9 && (a.z - b.z).abs() < 1e-9
        };

        // sin 60 rounds to 0.866, cos 60 to 0.5; rows step 1.0 in y
        assert!(close(buildings[0].offset(), Offset::new(2.0, 2.0, 4.464)));
        assert!(close(buildings[1].offset(), Offset::new(0.0, 2.0, 4.464)));
        assert!(close(buildings[3].offset(), Offset::new(0.0, 1.0, 2.732)));
        assert!(close(buildings[5].offset(), Offset::new(0.0, 0.0, 1.0)));

        assert_eq!(buildings[0].tilt, 89.0);
        assert_eq!(buildings[5].tilt, 89.0);
        assert_eq!(buildings[2].tilt, 108.0);

        let port = &buildings[6];
        assert_eq!(port.next(), Some(5));
        assert_eq!(port.offset(), Offset::new(-1.0, 0.0, 1.0));
    }
}
