//! Validation checks for screen configs and emitted building lists.
//!
//! Each check returns a `ValidationResult`; `mod.rs` merges them.

use crate::blueprint::geometry::BELT_MIN_DIS;
use crate::blueprint::{has_layout, Building};
use crate::types::{Config, GenerateMode, RenderMode};

use super::warning::{Diagnostic, ValidationResult};

/// Smallest gap the boundary belts keep from the rows around them.
const MIN_BOUNDARY_GAP: f64 = 0.01;

/// Warn when the mode pair has no screen layout.
pub fn check_mode_pair(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();
    let (generate, render) = config.modes();

    if !has_layout(generate, render) {
        result.push(
            Diagnostic::warning(
                "beltscreen::config::unsupported-modes",
                format!(
                    "No screen layout for generate mode '{}' with render mode '{}'; the blueprint will be empty",
                    generate, render
                ),
            )
            .with_help(
                "Belt screens take bw or gray; monitor screens take monitor_bw, monitor_gray or monitor_color_euclid",
            ),
        );
    }

    result
}

/// Warn about options the chosen modes never read.
pub fn check_ignored_options(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();
    let form = &config.form;
    let vertical = form.generate_mode == GenerateMode::BeltVerti;

    if form.fix_boundary && form.render_mode != RenderMode::Bw {
        result.push(
            Diagnostic::warning(
                "beltscreen::config::ignored-option",
                format!(
                    "fixBoundary only applies to bw belt screens, not render mode '{}'",
                    form.render_mode
                ),
            )
            .with_help("Remove fixBoundary or switch to renderMode: bw"),
        );
    }

    if form.add_input_port && !vertical {
        result.push(
            Diagnostic::warning(
                "beltscreen::config::ignored-option",
                "addInputPort only applies to belt_verti screens",
            )
            .with_help("Remove addInputPort or switch to generateMode: belt_verti"),
        );
    }

    if form.angle != 0.0 && !vertical {
        result.push(
            Diagnostic::warning(
                "beltscreen::config::ignored-option",
                format!("angle {} is ignored outside belt_verti screens", form.angle),
            ),
        );
    }

    result
}

/// Check that buildings can be spaced as configured.
pub fn check_spacing(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();
    let form = &config.form;

    if !form.space.is_finite() || form.space <= 0.0 {
        result.push(
            Diagnostic::error(
                "beltscreen::config::space",
                format!("space must be a positive number, got {}", form.space),
            )
            .with_help("A space of 1 places buildings one grid unit apart"),
        );
        return result;
    }

    if form.generate_mode != GenerateMode::Monitor && form.space < BELT_MIN_DIS {
        result.push(
            Diagnostic::warning(
                "beltscreen::config::space",
                format!(
                    "space {} is below the minimum belt distance {}",
                    form.space, BELT_MIN_DIS
                ),
            )
            .with_help("The game may refuse to place belts this close together"),
        );
    } else if form.fix_boundary
        && form.render_mode == RenderMode::Bw
        && form.space / 2.0 - BELT_MIN_DIS < MIN_BOUNDARY_GAP
    {
        result.push(
            Diagnostic::warning(
                "beltscreen::config::boundary-crowded",
                format!(
                    "space {} leaves no room for boundary belts between rows",
                    form.space
                ),
            )
            .with_help(format!(
                "Use a space of at least {} with fixBoundary",
                2.0 * (BELT_MIN_DIS + MIN_BOUNDARY_GAP)
            )),
        );
    }

    result
}

/// Check explicit target dimensions.
pub fn check_dimensions(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, value) in [("width", config.width), ("height", config.height)] {
        if value == Some(0) {
            result.push(
                Diagnostic::error(
                    "beltscreen::config::dimensions",
                    format!("{} must be at least 1", name),
                )
                .with_help("Leave it unset to use the source image size"),
            );
        }
    }

    result
}

/// Warn about knobs that will be clipped.
pub fn check_knob_ranges(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();
    let form = &config.form;

    let knobs = [
        ("threshold", form.threshold, 0, 255),
        ("contrast", form.contrast, -255, 255),
        ("brightness", form.brightness, -255, 255),
        ("hueShift", form.hue_shift, -180, 180),
    ];

    for (name, value, min, max) in knobs {
        if value < min || value > max {
            result.push(Diagnostic::warning(
                "beltscreen::config::clipped",
                format!(
                    "{} {} is outside {}..={} and will be clipped",
                    name, value, min, max
                ),
            ));
        }
    }

    result
}

/// Check that indices are dense and match positions.
pub fn check_dense_indices(buildings: &[Building]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (position, building) in buildings.iter().enumerate() {
        if building.index != position {
            result.push(
                Diagnostic::error(
                    "beltscreen::buildings::index",
                    format!("index {} stored at position {}", building.index, position),
                )
                .at_building(position),
            );
        }
    }

    result
}

/// Check output links and the slots that go with them.
pub fn check_links(buildings: &[Building]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let len = buildings.len();

    for (position, building) in buildings.iter().enumerate() {
        let target = building.output_obj_idx;

        if target < -1 || (target >= 0 && target as usize >= len) {
            result.push(
                Diagnostic::error(
                    "beltscreen::buildings::dangling-link",
                    format!("outputs to {} but the blueprint has {} buildings", target, len),
                )
                .at_building(position),
            );
            continue;
        }

        if building.next() == Some(position) {
            result.push(
                Diagnostic::error(
                    "beltscreen::buildings::self-link",
                    "outputs into itself",
                )
                .at_building(position),
            );
        }

        if building.is_belt() {
            let expected = if building.next().is_some() { 1 } else { 0 };
            if building.output_to_slot != expected {
                result.push(
                    Diagnostic::error(
                        "beltscreen::buildings::slot",
                        format!(
                            "output slot {} does not match link {}",
                            building.output_to_slot, target
                        ),
                    )
                    .with_help("Linked belts use slot 1, terminal belts slot 0")
                    .at_building(position),
                );
            }
        }
    }

    result
}

/// Check that monitor screens alternate monitor and belt at shared offsets.
pub fn check_monitor_pairs(buildings: &[Building]) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !buildings.iter().any(Building::is_monitor) {
        return result;
    }

    if buildings.len() % 2 != 0 {
        result.push(Diagnostic::error(
            "beltscreen::buildings::monitor-pair",
            format!("monitor screen has an odd building count {}", buildings.len()),
        ));
    }

    for (pair_index, pair) in buildings.chunks(2).enumerate() {
        let position = pair_index * 2;
        match pair {
            [monitor, belt] if monitor.is_monitor() && belt.is_belt() => {
                if monitor.local_offset != belt.local_offset {
                    result.push(
                        Diagnostic::error(
                            "beltscreen::buildings::monitor-pair",
                            "monitor and its belt are at different offsets",
                        )
                        .at_building(position),
                    );
                }
            }
            _ => {
                result.push(
                    Diagnostic::error(
                        "beltscreen::buildings::monitor-pair",
                        "expected a monitor followed by a belt",
                    )
                    .at_building(position),
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::Offset;
    use crate::types::FormConfig;

    fn config(form: FormConfig) -> Config {
        Config {
            form,
            ..Config::default()
        }
    }

    fn belt(index: usize, next: Option<usize>) -> Building {
        Building::belt(index, Offset::default(), 0.0, next)
    }

    #[test]
    fn test_check_mode_pair_supported() {
        assert!(check_mode_pair(&Config::default()).is_ok());
    }

    #[test]
    fn test_check_mode_pair_unsupported() {
        let result = check_mode_pair(&config(FormConfig {
            generate_mode: GenerateMode::Monitor,
            render_mode: RenderMode::Gray,
            ..FormConfig::default()
        }));
        assert!(result.has_warnings());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_check_ignored_options() {
        let result = check_ignored_options(&config(FormConfig {
            render_mode: RenderMode::Gray,
            fix_boundary: true,
            add_input_port: true,
            angle: 45.0,
            ..FormConfig::default()
        }));
        assert_eq!(result.warning_count(), 3);
    }

    #[test]
    fn test_check_ignored_options_vertical_is_clean() {
        let result = check_ignored_options(&config(FormConfig {
            generate_mode: GenerateMode::BeltVerti,
            fix_boundary: true,
            add_input_port: true,
            angle: 45.0,
            ..FormConfig::default()
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_spacing_rejects_non_positive() {
        for space in [0.0, -1.0, f64::NAN] {
            let result = check_spacing(&config(FormConfig {
                space,
                ..FormConfig::default()
            }));
            assert!(result.has_errors(), "space {}", space);
        }
    }

    #[test]
    fn test_check_spacing_warns() {
        let tight = check_spacing(&config(FormConfig {
            space: 0.2,
            ..FormConfig::default()
        }));
        assert_eq!(tight.codes(), vec!["beltscreen::config::space"]);

        let crowded = check_spacing(&config(FormConfig {
            space: 0.5,
            fix_boundary: true,
            ..FormConfig::default()
        }));
        assert_eq!(crowded.codes(), vec!["beltscreen::config::boundary-crowded"]);

        let roomy = check_spacing(&config(FormConfig {
            space: 1.0,
            fix_boundary: true,
            ..FormConfig::default()
        }));
        assert!(roomy.is_ok());
    }

    #[test]
    fn test_check_dimensions() {
        let cfg = Config {
            width: Some(0),
            height: Some(4),
            ..Config::default()
        };
        assert_eq!(check_dimensions(&cfg).error_count(), 1);
        assert!(check_dimensions(&Config::default()).is_ok());
    }

    #[test]
    fn test_check_knob_ranges() {
        let result = check_knob_ranges(&config(FormConfig {
            threshold: 300,
            hue_shift: -200,
            ..FormConfig::default()
        }));
        assert_eq!(result.warning_count(), 2);
    }

    #[test]
    fn test_check_dense_indices() {
        let ok = vec![belt(0, None), belt(1, Some(0))];
        assert!(check_dense_indices(&ok).is_ok());

        let gap = vec![belt(0, None), belt(2, None)];
        let result = check_dense_indices(&gap);
        assert_eq!(result.iter().next().and_then(|d| d.building), Some(1));
    }

    #[test]
    fn test_check_links_dangling() {
        let buildings = vec![belt(0, Some(5)), belt(1, None)];
        assert_eq!(
            check_links(&buildings).codes(),
            vec!["beltscreen::buildings::dangling-link"]
        );
    }

    #[test]
    fn test_check_links_slot_mismatch() {
        let mut linked = belt(1, Some(0));
        linked.output_to_slot = 0;
        let buildings = vec![belt(0, None), linked];
        assert_eq!(check_links(&buildings).codes(), vec!["beltscreen::buildings::slot"]);
    }

    #[test]
    fn test_check_links_self() {
        let buildings = vec![belt(0, Some(0))];
        assert_eq!(check_links(&buildings).codes(), vec!["beltscreen::buildings::self-link"]);
    }

    #[test]
    fn test_check_monitor_pairs() {
        let offset = Offset::new(1.0, 0.0, 0.0);
        let good = vec![
            Building::monitor(0, offset, 3),
            Building::belt(1, offset, 0.0, None),
        ];
        assert!(check_monitor_pairs(&good).is_ok());

        let swapped = vec![
            Building::belt(0, offset, 0.0, None),
            Building::monitor(1, offset, 3),
        ];
        assert!(check_monitor_pairs(&swapped).has_errors());

        let apart = vec![
            Building::monitor(0, offset, 3),
            Building::belt(1, Offset::default(), 0.0, None),
        ];
        assert!(check_monitor_pairs(&apart).has_errors());
    }

    #[test]
    fn test_check_monitor_pairs_skips_belt_screens() {
        let buildings = vec![belt(0, None)];
        assert!(check_monitor_pairs(&buildings).is_ok());
    }
}
