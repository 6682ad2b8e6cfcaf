//! Print the summary for a built-in panel and save its port diagram.
//!
//! ```text
//! cargo run --bin demo_wall_report -- [panel-id] [across] [down] [left|right|top|bottom] [out.png]
//! RUST_LOG=debug cargo run --bin demo_wall_report -- cb8 7 3 top
//! ```
#![cfg(feature = "host")]

use std::env;
use std::error::Error;
use std::path::PathBuf;

use ledwall_kit::catalog::{MemoryCatalog, PanelRepository};
use ledwall_kit::diagram::WallDiagram;
use ledwall_kit::panel::defaults::ABSEN_PL2_5_PRO;
use ledwall_kit::report::WallReport;
use ledwall_kit::to_png::write_diagram_png;
use ledwall_kit::wall::GridConfiguration;
use ledwall_kit::wall::layout::NumberingDirection;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let panel_id = args.next().unwrap_or_else(|| ABSEN_PL2_5_PRO.to_owned());
    let horizontal: u32 = args.next().map_or(Ok(4), |arg| arg.parse())?;
    let vertical: u32 = args.next().map_or(Ok(2), |arg| arg.parse())?;
    let direction = match args.next().as_deref() {
        None | Some("left") => NumberingDirection::Left,
        Some("right") => NumberingDirection::Right,
        Some("top") => NumberingDirection::Top,
        Some("bottom") => NumberingDirection::Bottom,
        Some(other) => return Err(format!("unknown direction `{other}`").into()),
    };
    let output = args
        .next()
        .map_or_else(|| PathBuf::from("target/wall.png"), PathBuf::from);

    let catalog = MemoryCatalog::with_defaults();
    let panel = catalog.find(&panel_id)?.resolve()?;
    let config = GridConfiguration::new(horizontal, vertical, direction)?;
    info!("Planning {}x{} wall of {}", horizontal, vertical, panel.spec().name);

    let report = WallReport::new(&panel, config);
    println!("{report}");

    let diagram = WallDiagram::new(&config, report.result());
    write_diagram_png(&diagram, &output)?;
    Ok(())
}
