#![allow(missing_docs)]
//! Wall diagram geometry.

use embedded_graphics::prelude::*;
use ledwall_kit::diagram::{PALETTE, WallDiagram, line_color};
use ledwall_kit::panel::defaults::{ABSEN_PL2_5_PRO, default_panel};
use ledwall_kit::panel::{AttachmentType, PortConfig};
use ledwall_kit::wall::layout::{Cell, NumberingDirection};
use ledwall_kit::wall::rigging::HeaderKind;
use ledwall_kit::wall::{GridConfiguration, compute};

// PL2.5 Pro panels (40,000 pixels) with three panels per port.
fn diagram(horizontal: u32, vertical: u32, direction: NumberingDirection, max_ports: u32) -> WallDiagram {
    let panel = default_panel(ABSEN_PL2_5_PRO)
        .expect("built-in panel")
        .with_port_config(Some(PortConfig {
            pixels_per_port: 120_000,
            max_ports,
        }))
        .resolve()
        .expect("valid panel");
    let config = GridConfiguration::new(horizontal, vertical, direction).expect("valid grid");
    let result = compute(&panel, config.size);
    WallDiagram::new(&config, &result)
}

#[test]
fn three_by_two_geometry_matches_expected() {
    let diagram = diagram(3, 2, NumberingDirection::Left, 16);

    assert_eq!(diagram.size, Size::new(368, 322));
    assert_eq!(diagram.direction, NumberingDirection::Left);
    assert_eq!(diagram.attachment_type, AttachmentType::Shackle);
    assert_eq!(diagram.uncovered, 0);

    let first = &diagram.panels[0];
    assert_eq!(first.cell, Cell::new(0, 0));
    assert_eq!(first.sequence_number, 1);
    assert_eq!(first.label, "R1C1");
    assert_eq!(first.top_left, Point::new(32, 56));
    assert_eq!(first.center, Point::new(82, 106));
    assert_eq!(first.port, Some(0));

    let last = &diagram.panels[5];
    assert_eq!(last.cell, Cell::new(1, 2));
    assert_eq!(last.sequence_number, 4);
    assert_eq!(last.label, "R2C3");
    assert_eq!(last.top_left, Point::new(236, 158));
    assert_eq!(last.port, Some(1));
}

#[test]
fn port_paths_follow_the_snake() {
    let diagram = diagram(3, 2, NumberingDirection::Left, 16);
    assert_eq!(diagram.port_paths.len(), 2);

    let first = &diagram.port_paths[0];
    assert_eq!(first.label, "P1 (1-3)");
    assert_eq!(first.color, PALETTE[0]);
    assert_eq!(
        first.points,
        vec![Point::new(82, 106), Point::new(184, 106), Point::new(286, 106)]
    );
    assert_eq!(first.label_at, Point::new(48, 111));
    // Two transitions: only the last carries an arrow.
    assert_eq!(first.arrows.len(), 1);
    assert_eq!(first.arrows[0].tip, Point::new(245, 106));
    assert_eq!(first.arrows[0].left, Point::new(237, 102));
    assert_eq!(first.arrows[0].right, Point::new(237, 110));

    let second = &diagram.port_paths[1];
    assert_eq!(second.label, "P2 (4-6)");
    assert_eq!(
        second.points,
        vec![Point::new(286, 208), Point::new(184, 208), Point::new(82, 208)]
    );
    // Leftward arrow points left.
    assert!(second.arrows[0].tip.x < second.arrows[0].left.x);
}

#[test]
fn headers_sit_above_their_columns() {
    let diagram = diagram(3, 2, NumberingDirection::Left, 16);
    assert_eq!(diagram.headers.len(), 2);

    let double = &diagram.headers[0];
    assert_eq!(double.run.kind, HeaderKind::Double);
    assert_eq!(double.top_left, Point::new(32, 32));
    assert_eq!(double.width, 202);
    assert_eq!(double.attachment_points, vec![Point::new(82, 32), Point::new(183, 32)]);

    let single = &diagram.headers[1];
    assert_eq!(single.run.kind, HeaderKind::Single);
    assert_eq!(single.top_left, Point::new(236, 32));
    assert_eq!(single.width, 100);
    assert_eq!(single.attachment_points, vec![Point::new(286, 32)]);
}

#[test]
fn legend_lists_each_port() {
    let diagram = diagram(3, 2, NumberingDirection::Left, 16);
    let labels: Vec<&str> = diagram.legend.iter().map(|entry| entry.label.as_str()).collect();
    assert_eq!(labels, vec!["Port 1", "Port 2"]);
    assert_eq!(diagram.legend[0].at, Point::new(38, 274));
    assert_eq!(diagram.legend[1].at, Point::new(118, 274));
    assert_eq!(diagram.legend[1].color, line_color(1));
}

#[test]
fn panels_past_the_last_port_are_uncovered() {
    let diagram = diagram(3, 2, NumberingDirection::Left, 1);
    assert_eq!(diagram.port_paths.len(), 1);
    assert_eq!(diagram.legend.len(), 1);
    assert_eq!(diagram.uncovered, 3);
    let uncovered = diagram.panels.iter().filter(|panel| panel.port.is_none()).count();
    assert_eq!(uncovered, 3);
}

#[test]
fn column_major_paths_run_down_columns() {
    let diagram = diagram(2, 3, NumberingDirection::Top, 16);
    let labels: Vec<&str> = diagram.port_paths.iter().map(|path| path.label.as_str()).collect();
    assert_eq!(labels, vec!["P1 (1-3)", "P2 (4-6)"]);
    let xs: Vec<i32> = diagram.port_paths[0].points.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![82, 82, 82]);
}

#[test]
fn colors_cycle_after_nineteen_ports() {
    // 20 × 1 wall, one panel per port.
    let panel = default_panel(ABSEN_PL2_5_PRO)
        .expect("built-in panel")
        .with_port_config(Some(PortConfig {
            pixels_per_port: 40_000,
            max_ports: 32,
        }))
        .resolve()
        .expect("valid panel");
    let config = GridConfiguration::new(20, 1, NumberingDirection::Left).expect("valid grid");
    let diagram = WallDiagram::new(&config, &compute(&panel, config.size));

    assert_eq!(diagram.port_paths.len(), 20);
    assert_eq!(diagram.port_paths[19].color, diagram.port_paths[0].color);
    assert!(diagram.port_paths[0].arrows.is_empty());
}
