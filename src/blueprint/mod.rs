//! Blueprint synthesis.
//!
//! Turns a preprocessed pixel buffer into the blueprint value the game
//! imports: a fixed header and area, plus one screen's worth of
//! buildings. Packing the value into the game's import string happens
//! elsewhere.
//!
//! # Example
//!
//! ```ignore
//! use beltscreen::blueprint::compile;
//! use beltscreen::progress::Immediate;
//!
//! let blueprint = compile(&mut pixels, &config, &mut Immediate)?;
//! println!("{}", blueprint.to_json()?);
//! ```

pub mod belt;
mod builder;
mod building;
pub mod geometry;
pub mod monitor;

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{BeltscreenError, Result};
use crate::progress::Progress;
use crate::render::render_image;
use crate::types::{Config, GenerateMode, PixelBuffer, RenderMode};

pub use builder::BuildingList;
pub use building::{
    Building, MonitorParameters, Offset, BELT_ITEM_ID, BELT_MODEL_INDEX, MONITOR_ITEM_ID,
    MONITOR_MODEL_INDEX, NO_LINK,
};

/// Header `desc` of every generated blueprint.
pub const ATTRIBUTION: &str = "Generated by beltscreen";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub layout: i32,
    pub icons: [i32; 5],
    /// Milliseconds since the Unix epoch.
    pub time: u64,
    pub game_version: i32,
    pub short_desc: String,
    pub desc: String,
}

impl Header {
    fn new(short_desc: &str, time: u64) -> Self {
        Self {
            layout: 10,
            icons: [0; 5],
            time,
            game_version: 0,
            short_desc: short_desc.to_string(),
            desc: ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub index: i32,
    pub parent_index: i32,
    pub tropic_anchor: i32,
    pub area_segments: i32,
    pub anchor_local_offset: Vec2,
    pub size: Vec2,
}

impl Default for Area {
    fn default() -> Self {
        Self {
            index: 0,
            parent_index: -1,
            tropic_anchor: 0,
            area_segments: 200,
            anchor_local_offset: Vec2::new(0.0, 0.0),
            size: Vec2::new(1.0, 1.0),
        }
    }
}

/// A complete blueprint value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub header: Header,
    pub version: i32,
    pub cursor_offset: Vec2,
    pub cursor_target_area: i32,
    pub drag_box_size: Vec2,
    pub primary_area_idx: i32,
    pub areas: Vec<Area>,
    pub buildings: Vec<Building>,
}

impl Blueprint {
    /// An empty blueprint stamped with `name` and `time`.
    pub fn new(name: &str, time: u64) -> Self {
        Self {
            header: Header::new(name, time),
            version: 1,
            cursor_offset: Vec2::new(0.0, 0.0),
            cursor_target_area: 0,
            drag_box_size: Vec2::new(1.0, 1.0),
            primary_area_idx: 0,
            areas: vec![Area::default()],
            buildings: Vec::new(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BeltscreenError::Build {
            message: format!("Failed to serialize blueprint: {}", e),
            help: None,
        })
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.buildings)
    }
}

/// Building counts of a blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub belts: usize,
    pub monitors: usize,
}

impl Summary {
    pub fn of(buildings: &[Building]) -> Self {
        buildings.iter().fold(Self::default(), |mut s, b| {
            if b.is_monitor() {
                s.monitors += 1;
            } else if b.is_belt() {
                s.belts += 1;
            }
            s
        })
    }

    /// Belts beyond one per pixel: boundary belts and the input port.
    pub fn extra_belts(&self, pixels: usize) -> usize {
        if self.monitors > 0 {
            0
        } else {
            self.belts.saturating_sub(pixels)
        }
    }

    pub fn total(&self) -> usize {
        self.belts + self.monitors
    }
}

/// Whether a mode pair has a screen layout. Other pairs synthesise to an
/// empty building list.
pub fn has_layout(generate: GenerateMode, render: RenderMode) -> bool {
    matches!(
        (generate, render),
        (
            GenerateMode::BeltHoriz | GenerateMode::BeltVerti,
            RenderMode::Bw | RenderMode::Gray
        ) | (
            GenerateMode::Monitor,
            RenderMode::MonitorBw | RenderMode::MonitorGray | RenderMode::MonitorColorEuclid
        )
    )
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Synthesise the buildings for `pixels` under the configured mode pair.
///
/// Mode pairs with no screen layout yield an empty list.
pub fn synthesise(
    pixels: &PixelBuffer,
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<Vec<Building>> {
    let form = &config.form;
    debug!(
        "synthesising {}x{} {} screen ({})",
        pixels.width(),
        pixels.height(),
        form.generate_mode,
        form.render_mode
    );

    let buildings = match config.modes() {
        (GenerateMode::BeltHoriz | GenerateMode::BeltVerti, RenderMode::Bw) => {
            belt::black_white_screen(pixels, form, progress)?
        }
        (GenerateMode::BeltHoriz | GenerateMode::BeltVerti, RenderMode::Gray) => {
            belt::gray_screen(pixels, form, progress)?
        }
        (GenerateMode::Monitor, RenderMode::MonitorBw | RenderMode::MonitorGray) => {
            monitor::gray_screen(pixels, form, progress)?
        }
        (GenerateMode::Monitor, RenderMode::MonitorColorEuclid) => {
            monitor::colour_screen(pixels, form, progress)?
        }
        (generate, render) => {
            warn!(
                "no screen layout for {} with {}; blueprint will be empty",
                generate, render
            );
            Vec::new()
        }
    };

    debug!("emitted {} buildings", buildings.len());
    Ok(buildings)
}

/// Wrap the synthesised buildings in a blueprint stamped with the current
/// time.
pub fn generate_blueprint(
    pixels: &PixelBuffer,
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<Blueprint> {
    let mut blueprint = Blueprint::new(&config.name, now_millis());
    blueprint.buildings = synthesise(pixels, config, progress)?;
    Ok(blueprint)
}

/// Preprocess `pixels` in place, then synthesise the blueprint.
pub fn compile(
    pixels: &mut PixelBuffer,
    config: &Config,
    progress: &mut dyn Progress,
) -> Result<Blueprint> {
    render_image(pixels, &config.form, progress)?;
    generate_blueprint(pixels, config, progress)
}
