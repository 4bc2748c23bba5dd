//! Palette command implementation.
//!
//! Lists the colours a flow monitor can show, with the index a blueprint
//! uses to select each one.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::{monitor_palette, Colour};

/// List the flow monitor palette
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Only list the achromatic entries
    #[arg(long)]
    pub gray: bool,
}

/// Palette lines as printed, in index order.
pub fn palette_lines(gray_only: bool) -> Vec<String> {
    monitor_palette()
        .colours()
        .iter()
        .enumerate()
        .filter(|(_, c)| !gray_only || c.is_achromatic())
        .map(|(i, c)| format_entry(i, *c))
        .collect()
}

fn format_entry(index: usize, colour: Colour) -> String {
    format!("{:>3}: {}", index, colour.to_hex())
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let lines = palette_lines(args.gray);
    let kind = if args.gray { "gray" } else { "colour" };

    printer.status(
        "Listing",
        &plural(lines.len(), &format!("{} entry", kind), &format!("{} entries", kind)),
    );

    // Palette lines go to stdout
    for line in &lines {
        println!("{}", line);
    }

    Ok(())
}
