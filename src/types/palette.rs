//! The flow-monitor colour palette and its derived lookup tables.
//!
//! Monitors can only show one of a fixed set of indicator colours. The
//! achromatic subset of that set forms the gray palette used by the gray
//! monitor screens. There is no pure black: the darkest gray is `#030303`.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Colour;

/// Indicator colours selectable on a flow monitor, by palette index.
pub const MONITOR_PALETTE: [Colour; 112] = [
    Colour::rgb(255, 191, 191),   // 0   red tint 75%
    Colour::rgb(255, 223, 191),   // 1   orange tint 75%
    Colour::rgb(255, 255, 191),   // 2   yellow tint 75%
    Colour::rgb(223, 255, 191),   // 3   lime tint 75%
    Colour::rgb(191, 255, 191),   // 4   green tint 75%
    Colour::rgb(191, 255, 223),   // 5   spring tint 75%
    Colour::rgb(191, 255, 255),   // 6   cyan tint 75%
    Colour::rgb(191, 223, 255),   // 7   azure tint 75%
    Colour::rgb(191, 191, 255),   // 8   blue tint 75%
    Colour::rgb(223, 191, 255),   // 9   violet tint 75%
    Colour::rgb(255, 191, 255),   // 10  magenta tint 75%
    Colour::rgb(255, 191, 223),   // 11  rose tint 75%
    Colour::rgb(255, 255, 255),   // 12  gray 255
    Colour::rgb(238, 238, 238),   // 13  gray 238
    Colour::rgb(255, 128, 128),   // 14  red tint 50%
    Colour::rgb(255, 192, 128),   // 15  orange tint 50%
    Colour::rgb(255, 255, 128),   // 16  yellow tint 50%
    Colour::rgb(192, 255, 128),   // 17  lime tint 50%
    Colour::rgb(128, 255, 128),   // 18  green tint 50%
    Colour::rgb(128, 255, 192),   // 19  spring tint 50%
    Colour::rgb(128, 255, 255),   // 20  cyan tint 50%
    Colour::rgb(128, 192, 255),   // 21  azure tint 50%
    Colour::rgb(128, 128, 255),   // 22  blue tint 50%
    Colour::rgb(192, 128, 255),   // 23  violet tint 50%
    Colour::rgb(255, 128, 255),   // 24  magenta tint 50%
    Colour::rgb(255, 128, 192),   // 25  rose tint 50%
    Colour::rgb(221, 221, 221),   // 26  gray 221
    Colour::rgb(204, 204, 204),   // 27  gray 204
    Colour::rgb(255, 64, 64),     // 28  red tint 25%
    Colour::rgb(255, 160, 64),    // 29  orange tint 25%
    Colour::rgb(255, 255, 64),    // 30  yellow tint 25%
    Colour::rgb(160, 255, 64),    // 31  lime tint 25%
    Colour::rgb(64, 255, 64),     // 32  green tint 25%
    Colour::rgb(64, 255, 160),    // 33  spring tint 25%
    Colour::rgb(64, 255, 255),    // 34  cyan tint 25%
    Colour::rgb(64, 160, 255),    // 35  azure tint 25%
    Colour::rgb(64, 64, 255),     // 36  blue tint 25%
    Colour::rgb(160, 64, 255),    // 37  violet tint 25%
    Colour::rgb(255, 64, 255),    // 38  magenta tint 25%
    Colour::rgb(255, 64, 160),    // 39  rose tint 25%
    Colour::rgb(187, 187, 187),   // 40  gray 187
    Colour::rgb(170, 170, 170),   // 41  gray 170
    Colour::rgb(255, 0, 0),       // 42  red pure
    Colour::rgb(255, 128, 0),     // 43  orange pure
    Colour::rgb(255, 255, 0),     // 44  yellow pure
    Colour::rgb(128, 255, 0),     // 45  lime pure
    Colour::rgb(0, 255, 0),       // 46  green pure
    Colour::rgb(0, 255, 128),     // 47  spring pure
    Colour::rgb(0, 255, 255),     // 48  cyan pure
    Colour::rgb(0, 128, 255),     // 49  azure pure
    Colour::rgb(0, 0, 255),       // 50  blue pure
    Colour::rgb(128, 0, 255),     // 51  violet pure
    Colour::rgb(255, 0, 255),     // 52  magenta pure
    Colour::rgb(255, 0, 128),     // 53  rose pure
    Colour::rgb(153, 153, 153),   // 54  gray 153
    Colour::rgb(136, 136, 136),   // 55  gray 136
    Colour::rgb(204, 0, 0),       // 56  red shade 80%
    Colour::rgb(204, 102, 0),     // 57  orange shade 80%
    Colour::rgb(204, 204, 0),     // 58  yellow shade 80%
    Colour::rgb(102, 204, 0),     // 59  lime shade 80%
    Colour::rgb(0, 204, 0),       // 60  green shade 80%
    Colour::rgb(0, 204, 102),     // 61  spring shade 80%
    Colour::rgb(0, 204, 204),     // 62  cyan shade 80%
    Colour::rgb(0, 102, 204),     // 63  azure shade 80%
    Colour::rgb(0, 0, 204),       // 64  blue shade 80%
    Colour::rgb(102, 0, 204),     // 65  violet shade 80%
    Colour::rgb(204, 0, 204),     // 66  magenta shade 80%
    Colour::rgb(204, 0, 102),     // 67  rose shade 80%
    Colour::rgb(119, 119, 119),   // 68  gray 119
    Colour::rgb(102, 102, 102),   // 69  gray 102
    Colour::rgb(153, 0, 0),       // 70  red shade 60%
    Colour::rgb(153, 77, 0),      // 71  orange shade 60%
    Colour::rgb(153, 153, 0),     // 72  yellow shade 60%
    Colour::rgb(77, 153, 0),      // 73  lime shade 60%
    Colour::rgb(0, 153, 0),       // 74  green shade 60%
    Colour::rgb(0, 153, 77),      // 75  spring shade 60%
    Colour::rgb(0, 153, 153),     // 76  cyan shade 60%
    Colour::rgb(0, 77, 153),      // 77  azure shade 60%
    Colour::rgb(0, 0, 153),       // 78  blue shade 60%
    Colour::rgb(77, 0, 153),      // 79  violet shade 60%
    Colour::rgb(153, 0, 153),     // 80  magenta shade 60%
    Colour::rgb(153, 0, 77),      // 81  rose shade 60%
    Colour::rgb(85, 85, 85),      // 82  gray 85
    Colour::rgb(68, 68, 68),      // 83  gray 68
    Colour::rgb(102, 0, 0),       // 84  red shade 40%
    Colour::rgb(102, 51, 0),      // 85  orange shade 40%
    Colour::rgb(102, 102, 0),     // 86  yellow shade 40%
    Colour::rgb(51, 102, 0),      // 87  lime shade 40%
    Colour::rgb(0, 102, 0),       // 88  green shade 40%
    Colour::rgb(0, 102, 51),      // 89  spring shade 40%
    Colour::rgb(0, 102, 102),     // 90  cyan shade 40%
    Colour::rgb(0, 51, 102),      // 91  azure shade 40%
    Colour::rgb(0, 0, 102),       // 92  blue shade 40%
    Colour::rgb(51, 0, 102),      // 93  violet shade 40%
    Colour::rgb(102, 0, 102),     // 94  magenta shade 40%
    Colour::rgb(102, 0, 51),      // 95  rose shade 40%
    Colour::rgb(51, 51, 51),      // 96  gray 51
    Colour::rgb(34, 34, 34),      // 97  gray 34
    Colour::rgb(51, 0, 0),        // 98  red shade 20%
    Colour::rgb(51, 26, 0),       // 99  orange shade 20%
    Colour::rgb(51, 51, 0),       // 100 yellow shade 20%
    Colour::rgb(26, 51, 0),       // 101 lime shade 20%
    Colour::rgb(0, 51, 0),        // 102 green shade 20%
    Colour::rgb(0, 51, 26),       // 103 spring shade 20%
    Colour::rgb(0, 51, 51),       // 104 cyan shade 20%
    Colour::rgb(0, 26, 51),       // 105 azure shade 20%
    Colour::rgb(0, 0, 51),        // 106 blue shade 20%
    Colour::rgb(26, 0, 51),       // 107 violet shade 20%
    Colour::rgb(51, 0, 51),       // 108 magenta shade 20%
    Colour::rgb(51, 0, 26),       // 109 rose shade 20%
    Colour::rgb(17, 17, 17),      // 110 gray 17
    Colour::rgb(3, 3, 3),         // 111 gray 3
];

/// Gray level that stands in for black, which the palette lacks.
pub const DARKEST_GRAY: u8 = 3;

static TABLES: LazyLock<MonitorPalette> = LazyLock::new(|| MonitorPalette::new(&MONITOR_PALETTE));

/// The process-wide monitor palette tables.
pub fn monitor_palette() -> &'static MonitorPalette {
    &TABLES
}

/// Lookup tables derived once from a palette.
#[derive(Debug)]
pub struct MonitorPalette {
    colours: &'static [Colour],

    /// Exact RGB -> first palette index with that colour.
    by_colour: HashMap<Colour, usize>,

    /// Achromatic levels present, ascending.
    gray_levels: Vec<u8>,

    /// Achromatic level -> palette index.
    gray_index: HashMap<u8, usize>,
}

impl MonitorPalette {
    /// Build the lookup tables for a palette.
    pub fn new(colours: &'static [Colour]) -> Self {
        let mut by_colour = HashMap::with_capacity(colours.len());
        let mut gray_index = HashMap::new();

        for (i, colour) in colours.iter().enumerate() {
            let opaque = colour.with_alpha(255);
            by_colour.entry(opaque).or_insert(i);
            if opaque.is_achromatic() {
                gray_index.entry(opaque.r).or_insert(i);
            }
        }

        let mut gray_levels: Vec<u8> = gray_index.keys().copied().collect();
        gray_levels.sort_unstable();

        Self {
            colours,
            by_colour,
            gray_levels,
            gray_index,
        }
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Colour at a palette index.
    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    /// All palette colours in index order.
    pub fn colours(&self) -> &[Colour] {
        self.colours
    }

    /// Achromatic levels present in the palette, ascending.
    pub fn gray_levels(&self) -> &[u8] {
        &self.gray_levels
    }

    /// Palette index of an exact achromatic level.
    pub fn gray_index(&self, level: u8) -> Option<usize> {
        self.gray_index.get(&level).copied()
    }

    /// Snap a gray value to the nearest achromatic level in the palette.
    ///
    /// Zero maps straight to the darkest gray. Equidistant values resolve
    /// to the lower level.
    pub fn closest_gray(&self, level: impl Into<f64>) -> u8 {
        let level = level.into();
        if level == 0.0 {
            if let Some(&darkest) = self.gray_levels.first() {
                return darkest;
            }
        }
        closest_in_sorted(&self.gray_levels, level).unwrap_or(DARKEST_GRAY)
    }

    /// Palette index of the gray nearest to `level`.
    ///
    /// Unlike [`gray_index`](Self::gray_index) this is total: it always
    /// lands on a level the palette contains.
    pub fn closest_gray_index(&self, level: impl Into<f64>) -> usize {
        let level = self.closest_gray(level);
        self.gray_index(level).unwrap_or_default()
    }

    /// Palette index of an exact colour given as hex, if present.
    pub fn hex_index(&self, hex: &str) -> Option<usize> {
        Colour::from_hex(hex).ok().and_then(|c| self.index_of(c))
    }

    /// Palette index of an exact RGB match, if present. Alpha is ignored.
    pub fn index_of(&self, colour: Colour) -> Option<usize> {
        self.by_colour.get(&colour.with_alpha(255)).copied()
    }

    /// Palette index minimising squared Euclidean RGB distance.
    ///
    /// Ties resolve to the lowest index.
    pub fn closest_palette(&self, rgb: impl Into<[f64; 3]>) -> usize {
        let [r, g, b] = rgb.into();
        let mut best_index = 0;
        let mut best_dist = f64::INFINITY;

        for (i, pc) in self.colours.iter().enumerate() {
            let dr = r - pc.r as f64;
            let dg = g - pc.g as f64;
            let db = b - pc.b as f64;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best_index = i;
            }
        }

        best_index
    }
}

/// Nearest element of an ascending slice by binary search.
///
/// A target exactly between two neighbours returns the lower one.
pub fn closest_in_sorted(sorted: &[u8], target: f64) -> Option<u8> {
    let last = sorted.len().checked_sub(1)?;
    let (mut left, mut right) = (0, last);

    while right - left > 1 {
        let mid = (left + right) / 2;
        if (sorted[mid] as f64) < target {
            left = mid;
        } else {
            right = mid;
        }
    }

    let (lo, hi) = (sorted[left] as f64, sorted[right] as f64);
    if target - lo <= hi - target {
        Some(sorted[left])
    } else {
        Some(sorted[right])
    }
}

/// Palette index of an exact achromatic level.
pub fn gray_index(level: u8) -> Option<usize> {
    monitor_palette().gray_index(level)
}

/// Nearest palette gray level; `0` yields the darkest gray.
pub fn closest_gray(level: impl Into<f64>) -> u8 {
    monitor_palette().closest_gray(level)
}

/// Palette index for an exact hex colour.
pub fn hex_index(hex: &str) -> Option<usize> {
    monitor_palette().hex_index(hex)
}

/// Palette index nearest to an RGB triple.
pub fn closest_palette(rgb: impl Into<[f64; 3]>) -> usize {
    monitor_palette().closest_palette(rgb)
}
