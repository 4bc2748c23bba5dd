use std::path::PathBuf;

use clap::Args;

use crate::error::{BeltscreenError, Result};
use crate::output::{display_path, Printer};
use crate::types::Config;
use crate::validation::{print_diagnostics, validate_config};

/// Validate a screen config
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Config files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let mut failed = 0;

    for file in &args.files {
        let config = Config::load(file)?;
        printer.status("Checking", &display_path(file));

        let result = validate_config(&config);
        print_diagnostics(&result, printer);

        if result.has_errors() || (args.strict && result.has_warnings()) {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(BeltscreenError::Build {
            message: format!("{} of {} config(s) failed validation", failed, args.files.len()),
            help: None,
        });
    }

    Ok(())
}
