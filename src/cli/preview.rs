//! Preview command implementation.
//!
//! Writes the image as the screen will show it, after resizing and
//! preprocessing.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, Printer, PrinterProgress};
use crate::render::{render_image, write_png};

use super::{load_pixels, ScreenArgs};

/// Write the preprocessed image as a PNG
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Source image
    #[arg(required = true)]
    pub image: PathBuf,

    #[command(flatten)]
    pub screen: ScreenArgs,

    /// Output PNG (default: <image>.preview.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,
}

pub fn run(args: PreviewArgs, printer: &Printer) -> Result<()> {
    let config = args.screen.resolve()?;
    let mut pixels = load_pixels(&args.image, &config)?;

    let mut progress = PrinterProgress::new(printer, "Quantising");
    render_image(&mut pixels, &config.form, &mut progress)?;

    let output = args
        .output
        .unwrap_or_else(|| args.image.with_extension("preview.png"));
    write_png(&pixels, &output, args.scale)?;

    printer.success(
        "Previewed",
        &format!(
            "{} ({}x{}, {}) -> {}",
            display_path(&args.image),
            pixels.width(),
            pixels.height(),
            config.form.render_mode,
            printer.cyan(&display_path(&output))
        ),
    );
    Ok(())
}
