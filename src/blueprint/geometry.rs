//! Where each pixel's building sits in the world.
//!
//! Columns are laid out right to left: raster column `c` becomes logical
//! column `x = W - c - 1`. Rows grow along +y on a flat screen. A tilted
//! screen stands up from its base, so rows climb in z and recede in y.

use crate::types::FormConfig;

use super::building::Offset;

/// Minimum spacing between two belts the game will accept.
pub const BELT_MIN_DIS: f64 = 0.25;

/// Smallest y step between rows of a tilted screen. A near-vertical
/// screen would otherwise stack belts at the same y and fold them.
pub const VERTI_MIN_DT_Y: f64 = 0.0005;

/// Trigonometry of a tilted screen, rounded the way the game UI shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tilt {
    sin: f64,
    cos: f64,
    dt_y: f64,
    top_z: f64,
    max_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    width: usize,
    height: usize,
    space: f64,
    z: f64,
    tilt: Option<Tilt>,
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

impl ScreenGeometry {
    /// A screen lying flat at height `z`.
    pub fn flat(width: usize, height: usize, space: f64, z: f64) -> Self {
        Self {
            width,
            height,
            space,
            z,
            tilt: None,
        }
    }

    /// A screen standing at `angle` degrees from the ground.
    pub fn tilted(width: usize, height: usize, space: f64, z: f64, angle: f64) -> Self {
        let rad = angle.to_radians();
        let sin = round3(rad.sin());
        let cos = round3(rad.cos());

        let mut dt_y = space * cos;
        if dt_y.abs() < VERTI_MIN_DT_Y {
            dt_y = VERTI_MIN_DT_Y;
        }
        let rows = height.saturating_sub(1) as f64;

        Self {
            width,
            height,
            space,
            z,
            tilt: Some(Tilt {
                sin,
                cos,
                dt_y,
                top_z: z + rows * space * sin,
                max_y: rows * dt_y,
            }),
        }
    }

    /// Geometry for a `width`x`height` screen as configured by `form`.
    pub fn from_form(width: usize, height: usize, form: &FormConfig) -> Self {
        if form.generate_mode.is_vertical() {
            Self::tilted(width, height, form.space, form.z, form.angle)
        } else {
            Self::flat(width, height, form.space, form.z)
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn is_tilted(&self) -> bool {
        self.tilt.is_some()
    }

    /// Logical `(x, y)` of raster index `i`.
    pub fn logical(&self, i: usize) -> (usize, usize) {
        (self.width - (i % self.width) - 1, i / self.width)
    }

    /// Centre of the building at logical `(x, y)`.
    pub fn place(&self, x: usize, y: usize) -> Offset {
        let (x, y) = (x as f64, y as f64);
        match self.tilt {
            None => Offset::new(x * self.space, y * self.space, self.z),
            Some(t) => Offset::new(
                x * self.space,
                t.max_y - y * t.dt_y,
                t.top_z - y * self.space * t.sin,
            ),
        }
    }

    /// Half the gap between the two belts sharpening a row boundary.
    pub fn boundary_distance(&self) -> f64 {
        (BELT_MIN_DIS / 2.0).min(self.space / 2.0 - BELT_MIN_DIS).max(0.01)
    }

    /// A boundary belt between rows `y - 1` and `y` of column `x`.
    ///
    /// `lean` is `1.0` to sit on the row `y` side of the boundary and
    /// `-1.0` for the row `y - 1` side.
    pub fn place_boundary(&self, x: usize, y: usize, lean: f64) -> Offset {
        let dis = self.boundary_distance();
        let (x, y) = (x as f64, y as f64);
        let centre_y = y * self.space - self.space / 2.0;

        match self.tilt {
            None => Offset::new(x * self.space, centre_y + lean * dis, self.z),
            Some(t) => Offset::new(
                x * self.space,
                t.max_y - (y * t.dt_y - t.dt_y / 2.0 + lean * dis * t.cos),
                t.top_z - (centre_y + lean * dis) * t.sin,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_logical_columns_reverse() {
        let geo = ScreenGeometry::flat(3, 2, 1.0, 0.0);
        let coords: Vec<_> = (0..6).map(|i| geo.logical(i)).collect();
        assert_eq!(coords, vec![(2, 0), (1, 0), (0, 0), (2, 1), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_flat_placement() {
        let geo = ScreenGeometry::flat(2, 2, 1.5, 3.0);
        assert_eq!(geo.place(1, 1), Offset::new(1.5, 1.5, 3.0));
        assert_eq!(geo.place(0, 0), Offset::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_tilted_at_ninety_degrees() {
        let geo = ScreenGeometry::tilted(1, 3, 1.0, 0.0, 90.0);

        // cos rounds to zero so rows are separated by the minimum step
        let top = geo.place(0, 0);
        let bottom = geo.place(0, 2);
        assert!(approx(top.y, 2.0 * VERTI_MIN_DT_Y));
        assert!(approx(top.z, 2.0));
        assert!(approx(bottom.y, 0.0));
        assert!(approx(bottom.z, 0.0));
    }

    #[test]
    fn test_tilted_rounds_trig() {
        let geo = ScreenGeometry::tilted(1, 2, 1.0, 0.0, 30.0);
        let top = geo.place(0, 0);

        // sin 30 = 0.5, cos 30 rounds to 0.866
        assert!(approx(top.y, 0.866));
        assert!(approx(top.z, 0.5));
        assert_eq!(geo.place(0, 1), Offset::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_tilted_at_zero_mirrors_rows() {
        let geo = ScreenGeometry::tilted(1, 3, 1.0, 2.0, 0.0);
        assert_eq!(geo.place(0, 0), Offset::new(0.0, 2.0, 2.0));
        assert_eq!(geo.place(0, 2), Offset::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_boundary_distance() {
        assert!(approx(ScreenGeometry::flat(1, 1, 1.0, 0.0).boundary_distance(), 0.125));
        assert!(approx(ScreenGeometry::flat(1, 1, 0.6, 0.0).boundary_distance(), 0.05));
        assert!(approx(ScreenGeometry::flat(1, 1, 0.3, 0.0).boundary_distance(), 0.01));
    }

    #[test]
    fn test_flat_boundary_placement() {
        let geo = ScreenGeometry::flat(2, 2, 1.0, 0.0);
        assert_eq!(geo.place_boundary(1, 1, 1.0), Offset::new(1.0, 0.625, 0.0));
        assert_eq!(geo.place_boundary(1, 1, -1.0), Offset::new(1.0, 0.375, 0.0));
    }

    #[test]
    fn test_tilted_boundary_between_rows() {
        let geo = ScreenGeometry::tilted(1, 2, 1.0, 0.0, 90.0);
        let row0 = geo.place(0, 0);
        let row1 = geo.place(0, 1);
        let near1 = geo.place_boundary(0, 1, 1.0);
        let near0 = geo.place_boundary(0, 1, -1.0);

        assert!(near0.z < row0.z && near0.z > near1.z && near1.z > row1.z);
        assert!(approx(near1.z, 0.375));
        assert!(approx(near0.z, 0.625));
    }
}
