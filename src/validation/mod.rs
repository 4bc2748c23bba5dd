//! Validation for screen configs and synthesised blueprints.
//!
//! Config checks catch settings that will be ignored, clipped or produce
//! an empty blueprint. Building checks confirm an emitted list is one the
//! game can import. Used by `beltscreen check` and `beltscreen build --validate`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::blueprint::Building;
use crate::output::{plural, Printer};
use crate::types::Config;

/// Run all config checks.
pub fn validate_config(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_mode_pair(config));
    result.merge(checks::check_ignored_options(config));
    result.merge(checks::check_spacing(config));
    result.merge(checks::check_dimensions(config));
    result.merge(checks::check_knob_ranges(config));

    result
}

/// Run all building-list checks.
pub fn validate_buildings(buildings: &[Building]) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_dense_indices(buildings));
    result.merge(checks::check_links(buildings));
    result.merge(checks::check_monitor_pairs(buildings));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        let location = d
            .building
            .map(|i| format!(" (building {})", i))
            .unwrap_or_default();
        eprintln!("  {}[{}]: {}{}", label, d.code, d.message, location);
        if let Some(help) = &d.help {
            eprintln!("    {}", printer.dim(&format!("help: {}", help)));
        }
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.error("Failed", &format!("validation: {}, {}", errors, warnings));
    } else if result.has_warnings() {
        printer.warning("Checked", &format!("passed with {}", warnings));
    } else {
        printer.success("Checked", "no problems found");
    }
}
