//! beltscreen - Image to belt and flow-monitor screen blueprints
//!
//! A library for turning raster images into blueprints of conveyor belts
//! and flow monitors: images are quantised to what the buildings can
//! show, then laid out as a screen of buildings.

pub mod blueprint;
pub mod cli;
pub mod error;
pub mod output;
pub mod progress;
pub mod render;
pub mod types;
pub mod validation;

pub use blueprint::{compile, generate_blueprint, synthesise, Blueprint, Building, Offset, Summary};
pub use error::{BeltscreenError, Result};
pub use progress::{Immediate, Progress};
pub use render::{render_image, write_png, Adjustments};
pub use types::{
    monitor_palette, Colour, Config, FormConfig, GenerateMode, MonitorPalette, PixelBuffer,
    RenderMode,
};
pub use validation::{validate_buildings, validate_config, Diagnostic, Severity, ValidationResult};
