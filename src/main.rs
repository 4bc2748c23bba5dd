use clap::Parser;
use miette::Result;
use beltscreen::cli::{Cli, Commands};
use beltscreen::output::{init_logger, Printer};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().verbose(cli.verbose);

    if let Err(e) = init_logger(printer) {
        printer.warning("warning", &format!("logging unavailable: {}", e));
    }

    match cli.command {
        Commands::Build(args) => beltscreen::cli::build::run(args, &printer)?,
        Commands::Preview(args) => beltscreen::cli::preview::run(args, &printer)?,
        Commands::Palette(args) => beltscreen::cli::palette::run(args, &printer)?,
        Commands::Check(args) => beltscreen::cli::check::run(args, &printer)?,
    }

    Ok(())
}
