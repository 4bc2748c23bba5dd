pub mod build;
pub mod check;
pub mod palette;
pub mod preview;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use image::imageops::{resize, FilterType};

use crate::error::{BeltscreenError, Result};
use crate::types::{Config, GenerateMode, PixelBuffer, RenderMode};

/// beltscreen - Compile images into belt and flow-monitor screen blueprints
#[derive(Parser, Debug)]
#[command(name = "beltscreen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug output and progress
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an image into blueprint JSON
    Build(build::BuildArgs),

    /// Write the preprocessed image as a PNG
    Preview(preview::PreviewArgs),

    /// List the flow monitor palette
    Palette(palette::PaletteArgs),

    /// Validate a screen config
    Check(check::CheckArgs),
}

/// Config file plus command-line overrides, shared by `build` and `preview`.
#[derive(Args, Debug, Default)]
pub struct ScreenArgs {
    /// Screen config (YAML or JSON)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// belt_horiz, belt_verti or monitor
    #[arg(long)]
    pub generate_mode: Option<GenerateMode>,

    /// bw, gray, monitor_bw, monitor_gray or monitor_color_euclid
    #[arg(long)]
    pub render_mode: Option<RenderMode>,

    /// Target width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Spacing between neighbouring buildings
    #[arg(long)]
    pub space: Option<f64>,

    /// Base height of the screen
    #[arg(long, allow_negative_numbers = true)]
    pub z: Option<f64>,

    /// Tilt of a vertical belt screen, in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Blueprint short description
    #[arg(long)]
    pub name: Option<String>,

    /// Chain every column into one belt
    #[arg(long)]
    pub connect_belt: bool,

    /// Sharpen edges between rows of bw belt screens
    #[arg(long)]
    pub fix_boundary: bool,

    /// Append a feeder belt to vertical belt screens
    #[arg(long)]
    pub add_input_port: bool,

    /// Black/white cut, 0-255
    #[arg(long)]
    pub threshold: Option<i32>,

    /// Contrast, -255 to 255
    #[arg(long, allow_negative_numbers = true)]
    pub contrast: Option<i32>,

    /// Brightness, -255 to 255
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Hue rotation in degrees, -180 to 180
    #[arg(long, allow_negative_numbers = true)]
    pub hue_shift: Option<i32>,

    /// Invert colours
    #[arg(long)]
    pub invert: bool,
}

impl ScreenArgs {
    /// Load the config file, if any, and apply overrides.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        let form = &mut config.form;

        if let Some(mode) = self.generate_mode {
            form.generate_mode = mode;
        }
        if let Some(mode) = self.render_mode {
            form.render_mode = mode;
        }
        if let Some(space) = self.space {
            form.space = space;
        }
        if let Some(z) = self.z {
            form.z = z;
        }
        if let Some(angle) = self.angle {
            form.angle = angle;
        }
        if let Some(threshold) = self.threshold {
            form.threshold = threshold;
        }
        if let Some(contrast) = self.contrast {
            form.contrast = contrast;
        }
        if let Some(brightness) = self.brightness {
            form.brightness = brightness;
        }
        if let Some(hue_shift) = self.hue_shift {
            form.hue_shift = hue_shift;
        }
        form.connect_belt |= self.connect_belt;
        form.fix_boundary |= self.fix_boundary;
        form.add_input_port |= self.add_input_port;
        form.inversion_color |= self.invert;

        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
    }
}

/// Target size for a `width`x`height` source under `config`.
///
/// A single configured dimension scales the other to keep the aspect
/// ratio.
pub fn target_size(width: u32, height: u32, config: &Config) -> (u32, u32) {
    let scaled = |num: u32, den: u32, by: u32| {
        ((by as f64 * num as f64 / den as f64).round() as u32).max(1)
    };

    match (config.width, config.height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, scaled(height, width, w)),
        (None, Some(h)) => (scaled(width, height, h), h),
        (None, None) => (width, height),
    }
}

/// Open an image and scale it to the configured screen size.
pub fn load_pixels(path: &Path, config: &Config) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| BeltscreenError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgba8();

    let (width, height) = target_size(img.width(), img.height(), config);
    if width == 0 || height == 0 {
        return Err(BeltscreenError::InvalidImage {
            message: format!("screen size {}x{} is empty", width, height),
            help: Some("Set width and height to at least 1".to_string()),
        });
    }

    let img = if (width, height) == img.dimensions() {
        img
    } else {
        log::debug!(
            "resizing {}x{} to {}x{}",
            img.width(),
            img.height(),
            width,
            height
        );
        resize(&img, width, height, FilterType::Triangle)
    };

    PixelBuffer::from_image(&img)
}
