//! Screen configuration (`*.screen.yaml` or JSON).
//!
//! The config names the output modes, the layout of the screen in the
//! game world and the preprocessing knobs. Every field has a default so a
//! partial file, or none at all, is valid.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BeltscreenError, Result};

/// Which building primitive the screen is made of, and how it is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateMode {
    /// Belts lying flat on the ground.
    #[default]
    BeltHoriz,
    /// Belts on a screen tilted up by `angle` degrees.
    BeltVerti,
    /// One flow monitor per pixel.
    Monitor,
    /// Any unrecognised mode string.
    #[serde(other)]
    Unknown,
}

/// How pixel colour is quantised before synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Two-level threshold for belt screens.
    #[default]
    Bw,
    /// Continuous gray for belt screens.
    Gray,
    MonitorBw,
    MonitorGray,
    MonitorColorEuclid,
    #[serde(other)]
    Unknown,
}

impl GenerateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerateMode::BeltHoriz => "belt_horiz",
            GenerateMode::BeltVerti => "belt_verti",
            GenerateMode::Monitor => "monitor",
            GenerateMode::Unknown => "unknown",
        }
    }

    pub fn is_vertical(self) -> bool {
        self == GenerateMode::BeltVerti
    }
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Bw => "bw",
            RenderMode::Gray => "gray",
            RenderMode::MonitorBw => "monitor_bw",
            RenderMode::MonitorGray => "monitor_gray",
            RenderMode::MonitorColorEuclid => "monitor_color_euclid",
            RenderMode::Unknown => "unknown",
        }
    }
}

impl FromStr for GenerateMode {
    type Err = BeltscreenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "belt_horiz" | "belt-horiz" | "horizontal" => Ok(GenerateMode::BeltHoriz),
            "belt_verti" | "belt-verti" | "vertical" => Ok(GenerateMode::BeltVerti),
            "monitor" => Ok(GenerateMode::Monitor),
            _ => Err(BeltscreenError::Parse {
                message: format!("Unknown generate mode: {}", s),
                help: Some("Use belt_horiz, belt_verti or monitor".to_string()),
            }),
        }
    }
}

impl FromStr for RenderMode {
    type Err = BeltscreenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bw" => Ok(RenderMode::Bw),
            "gray" | "grey" => Ok(RenderMode::Gray),
            "monitor_bw" => Ok(RenderMode::MonitorBw),
            "monitor_gray" | "monitor_grey" => Ok(RenderMode::MonitorGray),
            "monitor_color_euclid" | "monitor_color" => Ok(RenderMode::MonitorColorEuclid),
            _ => Err(BeltscreenError::Parse {
                message: format!("Unknown render mode: {}", s),
                help: Some(
                    "Use bw, gray, monitor_bw, monitor_gray or monitor_color_euclid".to_string(),
                ),
            }),
        }
    }
}

impl fmt::Display for GenerateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout and preprocessing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub generate_mode: GenerateMode,
    pub render_mode: RenderMode,

    /// Centre-to-centre spacing between neighbouring buildings.
    pub space: f64,

    /// Base height of the screen.
    pub z: f64,

    /// Tilt of a vertical belt screen, in degrees.
    pub angle: f64,

    /// Chain every column into one serpentine belt.
    pub connect_belt: bool,

    /// Sharpen vertical edges of binarised belt screens.
    pub fix_boundary: bool,

    /// Append a feeder belt to a vertical belt screen.
    pub add_input_port: bool,

    pub threshold: i32,
    pub contrast: i32,
    pub brightness: i32,
    pub hue_shift: i32,
    pub inversion_color: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            generate_mode: GenerateMode::default(),
            render_mode: RenderMode::default(),
            space: 1.0,
            z: 0.0,
            angle: 0.0,
            connect_belt: false,
            fix_boundary: false,
            add_input_port: false,
            threshold: 128,
            contrast: 0,
            brightness: 0,
            hue_shift: 0,
            inversion_color: false,
        }
    }
}

/// A complete screen config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target width in pixels; the source image size when absent.
    pub width: Option<u32>,

    /// Target height in pixels; the source image size when absent.
    pub height: Option<u32>,

    pub form: FormConfig,

    /// Short description written into the blueprint header.
    pub name: String,
}

impl Config {
    /// Load a config from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BeltscreenError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a config from YAML (JSON is accepted as a YAML subset).
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| BeltscreenError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check the screen config syntax".to_string()),
        })
    }

    /// The (generate, render) mode pair.
    pub fn modes(&self) -> (GenerateMode, RenderMode) {
        (self.form.generate_mode, self.form.render_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("name: logo").unwrap();

        assert_eq!(config.name, "logo");
        assert_eq!(config.width, None);
        assert_eq!(config.form, FormConfig::default());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
width: 64
height: 32
name: banner
form:
  generateMode: belt_verti
  renderMode: gray
  space: 1.5
  z: 2
  angle: 60
  connectBelt: true
  fixBoundary: true
  addInputPort: true
  threshold: 100
  contrast: 20
  brightness: -10
  hueShift: 30
  inversionColor: true
"#;
        let config = Config::parse(yaml).unwrap();

        assert_eq!((config.width, config.height), (Some(64), Some(32)));
        assert_eq!(config.modes(), (GenerateMode::BeltVerti, RenderMode::Gray));
        assert_eq!(config.form.space, 1.5);
        assert_eq!(config.form.z, 2.0);
        assert_eq!(config.form.angle, 60.0);
        assert!(config.form.connect_belt);
        assert!(config.form.fix_boundary);
        assert!(config.form.add_input_port);
        assert_eq!(config.form.threshold, 100);
        assert_eq!(config.form.contrast, 20);
        assert_eq!(config.form.brightness, -10);
        assert_eq!(config.form.hue_shift, 30);
        assert!(config.form.inversion_color);
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{"name": "j", "form": {"generateMode": "monitor", "renderMode": "monitor_bw"}}"#;
        let config = Config::parse(json).unwrap();
        assert_eq!(config.modes(), (GenerateMode::Monitor, RenderMode::MonitorBw));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config = Config::parse("name: x\nfont: SimSun\nform:\n  textAlign: center\n").unwrap();
        assert_eq!(config.name, "x");
    }

    #[test]
    fn test_unknown_mode_strings() {
        let config = Config::parse("form:\n  generateMode: hologram\n  renderMode: sepia\n").unwrap();
        assert_eq!(config.modes(), (GenerateMode::Unknown, RenderMode::Unknown));
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("form: [1, 2").is_err());
        assert!(Config::parse("form:\n  space: wide\n").is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("belt_verti".parse::<GenerateMode>().unwrap(), GenerateMode::BeltVerti);
        assert_eq!("Monitor".parse::<GenerateMode>().unwrap(), GenerateMode::Monitor);
        assert_eq!("monitor-gray".parse::<RenderMode>().unwrap(), RenderMode::MonitorGray);
        assert!("sepia".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_mode_display_matches_wire_names() {
        assert_eq!(GenerateMode::BeltHoriz.to_string(), "belt_horiz");
        assert_eq!(RenderMode::MonitorColorEuclid.to_string(), "monitor_color_euclid");
    }
}
