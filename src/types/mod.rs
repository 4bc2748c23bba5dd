//! Core domain types for beltscreen.
//!
//! This module contains the value types shared across the pipeline:
//! - `Colour` - RGBA colour values
//! - `MonitorPalette` - the fixed flow-monitor palette and its lookups
//! - `PixelBuffer` - the row-major RGBA image being compiled
//! - `Config` - screen layout and preprocessing settings

pub mod adjust;
mod colour;
mod config;
pub mod palette;
mod pixels;

pub use colour::Colour;
pub use config::{Config, FormConfig, GenerateMode, RenderMode};
pub use palette::{monitor_palette, MonitorPalette, MONITOR_PALETTE};
pub use pixels::PixelBuffer;
