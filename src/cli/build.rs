//! Build command implementation.
//!
//! Loads an image, preprocesses and synthesises it, and writes the
//! blueprint value as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::blueprint::{generate_blueprint, Blueprint};
use crate::render::render_image;
use crate::error::{BeltscreenError, Result};
use crate::output::{display_path, plural, Printer, PrinterProgress};
use crate::types::Config;
use crate::validation::{print_diagnostics, validate_buildings, validate_config};

use super::{load_pixels, ScreenArgs};

/// Compile an image into blueprint JSON
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Source image
    #[arg(required = true)]
    pub image: PathBuf,

    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Validate the config and the emitted buildings
    #[arg(long)]
    pub validate: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let mut config = args.screen.resolve()?;
    if config.name.is_empty() {
        config.name = default_name(&args.image);
    }

    if args.validate {
        let result = validate_config(&config);
        if !result.is_ok() {
            print_diagnostics(&result, printer);
        }
        if result.has_errors() {
            return Err(invalid_config());
        }
    }

    let mut pixels = load_pixels(&args.image, &config)?;
    printer.status(
        "Compiling",
        &format!(
            "{} ({}x{}, {} {})",
            display_path(&args.image),
            pixels.width(),
            pixels.height(),
            config.form.generate_mode,
            config.form.render_mode
        ),
    );

    let mut progress = PrinterProgress::new(printer, "Quantising");
    render_image(&mut pixels, &config.form, &mut progress)?;
    progress.stage("Placing");
    let blueprint = generate_blueprint(&pixels, &config, &mut progress)?;

    if args.validate {
        let result = validate_buildings(&blueprint.buildings);
        print_diagnostics(&result, printer);
        if result.has_errors() {
            return Err(BeltscreenError::Build {
                message: "emitted buildings failed validation".to_string(),
                help: None,
            });
        }
    }

    let json = blueprint.to_json()?;
    match &args.output {
        Some(path) => write_output(path, &json)?,
        None => println!("{}", json),
    }

    report(&blueprint, pixels.len(), &config, args.output.as_deref(), printer);
    Ok(())
}

fn invalid_config() -> BeltscreenError {
    BeltscreenError::Build {
        message: "config failed validation".to_string(),
        help: Some("Run `beltscreen check` on the config for details".to_string()),
    }
}

/// Blueprint name from an image path: its file stem.
fn default_name(image: &Path) -> String {
    image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BeltscreenError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::write(path, json).map_err(|e| BeltscreenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write blueprint: {}", e),
    })
}

fn report(
    blueprint: &Blueprint,
    pixels: usize,
    config: &Config,
    output: Option<&Path>,
    printer: &Printer,
) {
    let summary = blueprint.summary();
    if summary.total() == 0 {
        printer.warning(
            "Empty",
            &format!(
                "no buildings for {} with {}",
                config.form.generate_mode, config.form.render_mode
            ),
        );
        return;
    }

    let mut parts = vec![plural(summary.belts, "belt", "belts")];
    if summary.monitors > 0 {
        parts.push(plural(summary.monitors, "monitor", "monitors"));
    }
    let extra = summary.extra_belts(pixels);
    if extra > 0 {
        parts.push(format!("{} extra", extra));
    }

    let target = output
        .map(|p| printer.cyan(&display_path(p)))
        .unwrap_or_else(|| "stdout".to_string());
    printer.success("Finished", &format!("{} -> {}", parts.join(", "), target));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use crate::types::{Colour, GenerateMode, PixelBuffer};

    fn write_image(dir: &Path) -> PathBuf {
        let path = dir.join("logo.png");
        let pixels = PixelBuffer::from_rows(&[
            vec![Colour::WHITE, Colour::BLACK],
            vec![Colour::BLACK, Colour::WHITE],
        ])
        .unwrap();
        pixels.to_image().unwrap().save(&path).unwrap();
        path
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name(Path::new("art/logo.png")), "logo");
    }

    #[test]
    fn test_build_writes_blueprint_json() {
        let dir = tempdir().unwrap();
        let image = write_image(dir.path());
        let output = dir.path().join("out/logo.json");

        let args = BuildArgs {
            image,
            screen: ScreenArgs {
                connect_belt: true,
                ..ScreenArgs::default()
            },
            output: Some(output.clone()),
            validate: true,
        };
        run(args, &Printer::new()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["header"]["shortDesc"], "logo");
        assert_eq!(json["buildings"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_build_monitor_screen() {
        let dir = tempdir().unwrap();
        let image = write_image(dir.path());
        let output = dir.path().join("monitor.json");

        let args = BuildArgs {
            image,
            screen: ScreenArgs {
                generate_mode: Some(GenerateMode::Monitor),
                render_mode: Some(crate::types::RenderMode::MonitorBw),
                name: Some("sign".to_string()),
                ..ScreenArgs::default()
            },
            output: Some(output.clone()),
            validate: false,
        };
        run(args, &Printer::new()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["header"]["shortDesc"], "sign");
        assert_eq!(json["buildings"].as_array().unwrap().len(), 8);
        assert_eq!(json["buildings"][0]["itemId"], 2030);
    }

    #[test]
    fn test_build_validate_rejects_bad_config() {
        let dir = tempdir().unwrap();
        let image = write_image(dir.path());

        let args = BuildArgs {
            image,
            screen: ScreenArgs {
                space: Some(0.0),
                ..ScreenArgs::default()
            },
            output: Some(dir.path().join("never.json")),
            validate: true,
        };
        let err = run(args, &Printer::new()).unwrap_err();

        assert!(matches!(err, BeltscreenError::Build { .. }));
        assert!(!dir.path().join("never.json").exists());
    }
}
