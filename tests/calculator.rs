#![allow(missing_docs)]
//! Screen totals: geometry, weight, power, rigging, ports, and cases.

use ledwall_kit::Error;
use ledwall_kit::panel::defaults::{ABSEN_PL2_5_PRO, CARBON_CB8, default_panel, default_panels};
use ledwall_kit::panel::{PanelSpec, PortConfig, PowerConfig, ResolvedPanel};
use ledwall_kit::wall::layout::{GridSize, NumberingDirection};
use ledwall_kit::wall::rigging::{HeaderKind, header_counts, header_runs};
use ledwall_kit::wall::{Capacity, GridConfiguration, calculate, compute, fit_panel_count};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn pl2_5_pro() -> ResolvedPanel {
    default_panel(ABSEN_PL2_5_PRO)
        .expect("built-in panel")
        .resolve()
        .expect("valid built-in panel")
}

fn size(horizontal: u32, vertical: u32) -> GridSize {
    GridSize::new(horizontal, vertical).expect("valid size")
}

#[test]
fn four_by_two_pl2_5_pro_matches_expected() {
    let result = compute(&pl2_5_pro(), size(4, 2));

    assert_eq!(result.total_panels, 8);
    assert!((result.dimensions.width - 2.0).abs() < EPSILON);
    assert!((result.dimensions.height - 1.0).abs() < EPSILON);
    assert_eq!(result.resolution.horizontal, 800);
    assert_eq!(result.resolution.vertical, 400);
    assert_eq!(result.resolution.total, 320_000);
    assert_eq!(result.rigging.single_headers, 0);
    assert_eq!(result.rigging.double_headers, 2);
    assert_eq!(result.rigging.total_points, 4);
    assert!((result.weight - (8.0 * 6.2 + 2.0 * 1.0)).abs() < EPSILON);
    assert!((result.power - 1280.0).abs() < EPSILON);
    assert_eq!(result.flight_cases, 1);
}

#[test]
fn four_by_two_pl2_5_pro_ports_and_lines() {
    let result = compute(&pl2_5_pro(), size(4, 2));

    assert_eq!(result.ports.pixels_per_panel, 40_000);
    assert_eq!(result.ports.pixels_per_port, 65_536);
    assert_eq!(result.ports.panels_per_port.raw(), 1);
    assert!(!result.ports.panels_per_port.is_clamped());
    assert_eq!(result.ports.total_ports, 8);
    assert_eq!(result.ports.controllers_needed, 1);

    assert_eq!(result.power_lines.panels_per_line.raw(), 22);
    assert_eq!(result.power_lines.lines_needed, 1);
    assert!((result.power_lines.total_power_load - 1280.0).abs() < EPSILON);
}

#[test]
fn one_panel_wide_uses_one_single_header_at_any_height() {
    for vertical in [1, 2, 7] {
        let result = compute(&pl2_5_pro(), size(1, vertical));
        assert_eq!(result.rigging.single_headers, 1);
        assert_eq!(result.rigging.double_headers, 0);
        assert!((result.rigging.weight - 0.6).abs() < EPSILON);
    }
}

#[test]
fn three_wide_uses_one_double_and_one_single() {
    let result = compute(&pl2_5_pro(), size(3, 2));
    assert_eq!(result.rigging.single_headers, 1);
    assert_eq!(result.rigging.double_headers, 1);
    assert_eq!(result.rigging.total_points, 3);
    assert!((result.rigging.weight - 1.6).abs() < EPSILON);
}

#[test]
fn rigging_is_not_scaled_by_rows() {
    let short = compute(&pl2_5_pro(), size(6, 1));
    let tall = compute(&pl2_5_pro(), size(6, 5));
    assert_eq!(short.rigging, tall.rigging);
}

#[test]
fn header_runs_agree_with_counts() {
    for horizontal in 1..=12 {
        let runs = header_runs(horizontal);
        let singles = runs.iter().filter(|run| run.kind == HeaderKind::Single).count() as u32;
        let doubles = runs.iter().filter(|run| run.kind == HeaderKind::Double).count() as u32;
        assert_eq!((singles, doubles), header_counts(horizontal));
        let covered: u32 = runs.iter().map(|run| run.kind.span()).sum();
        assert_eq!(covered, horizontal);
    }
}

#[test]
fn oversized_panel_clamps_ports_to_one() -> Result<(), Error> {
    // 200 × 200 pixels against a 10,000 pixel port.
    let spec = default_panel(ABSEN_PL2_5_PRO)
        .expect("built-in panel")
        .with_port_config(Some(PortConfig {
            pixels_per_port: 10_000,
            max_ports: 4,
        }));
    let result = calculate(&spec, 3, 3)?;

    assert_eq!(result.ports.panels_per_port.raw(), 0);
    assert!(result.ports.panels_per_port.is_clamped());
    assert_eq!(result.ports.panels_per_port.effective().get(), 1);
    assert_eq!(result.ports.total_ports, 9);
    assert_eq!(result.ports.controllers_needed, 3);
    Ok(())
}

#[test]
fn power_hungry_panel_clamps_lines_to_one() -> Result<(), Error> {
    let spec = default_panel(CARBON_CB8)
        .expect("built-in panel")
        .with_power_config(Some(PowerConfig {
            max_watts_per_line: 500.0,
        }));
    let result = calculate(&spec, 2, 2)?;

    assert!(result.power_lines.panels_per_line.is_clamped());
    assert_eq!(result.power_lines.lines_needed, 4);
    Ok(())
}

#[test]
fn capacity_from_raw() {
    let clamped = Capacity::from_raw(0);
    assert!(clamped.is_clamped());
    assert_eq!(clamped.effective().get(), 1);
    assert_eq!(clamped.as_group_size().get(), 1);

    let plain = Capacity::from_raw(5);
    assert!(!plain.is_clamped());
    assert_eq!(plain.effective().get(), 5);
}

#[test]
fn missing_configs_fall_back() -> Result<(), Error> {
    let spec = default_panel(ABSEN_PL2_5_PRO)
        .expect("built-in panel")
        .with_port_config(None)
        .with_power_config(None);
    let result = calculate(&spec, 4, 4)?;

    // One panel per port, sixteen ports per controller, 3600 W lines.
    assert_eq!(result.ports.pixels_per_port, result.ports.pixels_per_panel);
    assert_eq!(result.ports.total_ports, 16);
    assert_eq!(result.ports.controllers_needed, 1);
    assert!((result.power_lines.max_watts_per_line - 3600.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn invalid_specs_are_reported_not_defaulted() {
    let base = default_panel(ABSEN_PL2_5_PRO).expect("built-in panel");

    let zero_width = PanelSpec {
        width: 0.0,
        ..base.clone()
    };
    assert!(matches!(
        calculate(&zero_width, 2, 2),
        Err(Error::InvalidSpec { field: "width", .. })
    ));

    let negative_power = PanelSpec {
        power: -5.0,
        ..base.clone()
    };
    assert!(matches!(
        calculate(&negative_power, 2, 2),
        Err(Error::InvalidSpec { field: "power", .. })
    ));

    let no_ports = base.clone().with_port_config(Some(PortConfig {
        pixels_per_port: 65_536,
        max_ports: 0,
    }));
    assert!(matches!(
        calculate(&no_ports, 2, 2),
        Err(Error::InvalidSpec {
            field: "portConfig.maxPorts",
            ..
        })
    ));

    let no_watts = base.with_power_config(Some(PowerConfig {
        max_watts_per_line: 0.0,
    }));
    assert!(matches!(
        calculate(&no_watts, 2, 2),
        Err(Error::InvalidSpec {
            field: "powerConfig.maxWattsPerLine",
            ..
        })
    ));
}

#[test]
fn invalid_grid_is_reported() {
    let spec = default_panel(ABSEN_PL2_5_PRO).expect("built-in panel");
    assert!(matches!(calculate(&spec, 0, 2), Err(Error::InvalidGrid { .. })));
}

#[test]
fn every_default_panel_is_valid() {
    for spec in default_panels() {
        let result = calculate(&spec, 5, 3).expect("built-in panels are valid");
        assert_eq!(result.total_panels, 15);
        assert!(!result.ports.panels_per_port.is_clamped(), "{}", spec.id);
        assert!(!result.power_lines.panels_per_line.is_clamped(), "{}", spec.id);
    }
}

#[test]
fn fit_rounds_to_nearest_whole_panel() -> Result<(), Error> {
    let panel = pl2_5_pro();
    let config = GridConfiguration::fit(&panel, 2_600.0, 1_100.0, NumberingDirection::Top)?;
    assert_eq!(config.size, size(5, 2));
    assert_eq!(config.direction, NumberingDirection::Top);

    let (width_difference, height_difference) = config.size_difference_mm(&panel, 2_600.0, 1_100.0);
    assert!((width_difference + 100.0).abs() < EPSILON);
    assert!((height_difference + 100.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn fit_never_goes_below_one_panel() {
    assert_eq!(fit_panel_count(0.0, 500.0), 1);
    assert_eq!(fit_panel_count(-40.0, 500.0), 1);
    assert_eq!(fit_panel_count(f64::NAN, 500.0), 1);
    assert_eq!(fit_panel_count(750.0, 500.0), 2);
}

proptest! {
    #[test]
    fn weight_grows_with_every_added_row(
        horizontal in 1_u32..30,
        vertical in 1_u32..30,
        weight in 0.1_f64..60.0,
    ) {
        let spec = PanelSpec::new("p", "P", "Test", 500.0, 500.0, 2.5, weight, 160.0);
        let panel = spec.resolve().expect("valid spec");
        let shorter = compute(&panel, size(horizontal, vertical));
        let taller = compute(&panel, size(horizontal, vertical + 1));
        prop_assert!(taller.weight > shorter.weight);
    }

    #[test]
    fn ports_and_lines_hold_every_panel(
        horizontal in 1_u32..40,
        vertical in 1_u32..40,
        pixels_per_port in 1_u32..500_000,
        max_ports in 1_u32..32,
        max_watts_per_line in 1.0_f64..10_000.0,
    ) {
        let spec = PanelSpec::new("p", "P", "Test", 500.0, 500.0, 2.5, 6.2, 160.0)
            .with_port_config(Some(PortConfig { pixels_per_port, max_ports }))
            .with_power_config(Some(PowerConfig { max_watts_per_line }));
        let result = calculate(&spec, horizontal, vertical).expect("valid inputs");
        let panels = u64::from(result.total_panels);
        let ports = result.ports;
        prop_assert!(ports.total_ports * ports.panels_per_port.effective().get() >= panels);
        prop_assert!(ports.controllers_needed * u64::from(max_ports) >= ports.total_ports);
        let lines = result.power_lines;
        prop_assert!(lines.lines_needed * lines.panels_per_line.effective().get() >= panels);
    }
}
