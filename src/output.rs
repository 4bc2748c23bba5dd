//! Terminal output formatting for the beltscreen CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for machine-readable output.
//! The same printer backs the `log` facade and reports pipeline progress.

use std::io::{self, IsTerminal, Write};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::error::Result;
use crate::progress::Progress;

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Prints Cargo-style status lines to stderr with optional ANSI colours.
/// Colour is enabled when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
    verbose: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            verbose: false,
        }
    }

    /// Also show debug output and progress.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a status line with a green bold verb.
    /// e.g. "   Compiling logo.png (64x32)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print a success/completion line with a green bold verb.
    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Print a dim line, shown only when verbose.
    pub fn debug(&self, verb: &str, message: &str) {
        if self.verbose {
            self.print_line(DIM, verb, message);
        }
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as bold.
    pub fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as cyan (for paths, info).
    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a diagnostic severity label with colour.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// `log` backend that writes records through a [`Printer`].
struct PrinterLogger {
    printer: Printer,
    level: LevelFilter,
}

impl Log for PrinterLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("beltscreen")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        match record.level() {
            Level::Error => self.printer.error("error", &message),
            Level::Warn => self.printer.warning("warning", &message),
            Level::Info => self.printer.info("info", &message),
            Level::Debug | Level::Trace => self.printer.print_line(DIM, "debug", &message),
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Log level shown for a given verbosity.
pub fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install `printer` as the global `log` backend.
pub fn init_logger(printer: Printer) -> std::result::Result<(), SetLoggerError> {
    let level = log_level(printer.is_verbose());
    log::set_boxed_logger(Box::new(PrinterLogger { printer, level }))?;
    log::set_max_level(level);
    Ok(())
}

/// Progress host that runs every step immediately and reports each
/// tenth of the way through a verbose printer.
///
/// A percent lower than the last report starts a new pass, so one host can
/// be threaded through several stages.
pub struct PrinterProgress<'a> {
    printer: &'a Printer,
    stage: &'a str,
    reported: Option<u8>,
    reports: usize,
}

impl<'a> PrinterProgress<'a> {
    pub fn new(printer: &'a Printer, stage: &'a str) -> Self {
        Self {
            printer,
            stage,
            reported: None,
            reports: 0,
        }
    }

    /// Start reporting a new stage from zero.
    pub fn stage(&mut self, stage: &'a str) {
        self.stage = stage;
        self.reported = None;
    }
}

impl Progress for PrinterProgress<'_> {
    fn step(&mut self, percent: u8, _stride: Option<usize>, work: &mut dyn FnMut()) -> Result<()> {
        work();
        let decile = percent / 10;
        if self.reported.is_some_and(|r| decile < r) {
            self.reported = None;
        }
        if self.reported.map_or(true, |r| decile > r) {
            self.reported = Some(decile);
            self.reports += 1;
            self.printer
                .debug(self.stage, &format!("{:>3}%", decile as u32 * 10));
        }
        Ok(())
    }
}

/// Pluralize a count: `plural(1, "belt", "belts")` → "1 belt".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
