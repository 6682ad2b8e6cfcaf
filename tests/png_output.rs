#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Rasterized wall diagrams.

use std::error::Error;
use std::fs::File;

use embedded_graphics::prelude::*;
use ledwall_kit::diagram::WallDiagram;
use ledwall_kit::panel::defaults::{ABSEN_PL2_5_PRO, default_panel};
use ledwall_kit::to_png::{BACKGROUND, HEADER_FILL, PANEL_FILL, UNCOVERED_FILL, render_diagram, write_diagram_png};
use ledwall_kit::wall::layout::NumberingDirection;
use ledwall_kit::wall::{GridConfiguration, compute};
use png::{BitDepth, ColorType, Decoder};

fn pl2_5_pro_diagram(horizontal: u32, vertical: u32) -> Result<WallDiagram, Box<dyn Error>> {
    let panel = default_panel(ABSEN_PL2_5_PRO).ok_or("missing built-in panel")?.resolve()?;
    let config = GridConfiguration::new(horizontal, vertical, NumberingDirection::Left)?;
    Ok(WallDiagram::new(&config, &compute(&panel, config.size)))
}

#[test]
fn rendered_canvas_shows_panels_headers_and_paths() -> Result<(), Box<dyn Error>> {
    let diagram = pl2_5_pro_diagram(4, 2)?;
    let canvas = render_diagram(&diagram);

    assert_eq!(canvas.size(), diagram.size);
    assert_eq!(canvas.pixel(Point::new(0, 0)), Some(BACKGROUND));

    // Inside the first panel box, away from its label and port dot.
    let first = &diagram.panels[0];
    assert_eq!(canvas.pixel(first.top_left + Point::new(90, 90)), Some(PANEL_FILL));

    // Middle of the first header bar.
    let header = &diagram.headers[0];
    assert_eq!(
        canvas.pixel(header.top_left + Point::new(20, 12)),
        Some(HEADER_FILL)
    );

    // Port dots are drawn at panel centres in the port color.
    let path = &diagram.port_paths[0];
    assert_eq!(canvas.pixel(path.points[0]), Some(path.color));
    Ok(())
}

#[test]
fn uncovered_panels_are_filled_differently() -> Result<(), Box<dyn Error>> {
    // 20 one-panel ports on a 16-port controller: the last 4 are uncovered.
    let diagram = pl2_5_pro_diagram(10, 2)?;
    assert_eq!(diagram.uncovered, 4);
    let canvas = render_diagram(&diagram);

    let uncovered = diagram
        .panels
        .iter()
        .find(|panel| panel.port.is_none())
        .ok_or("no uncovered panel")?;
    assert_eq!(
        canvas.pixel(uncovered.top_left + Point::new(90, 90)),
        Some(UNCOVERED_FILL)
    );
    Ok(())
}

#[test]
fn png_is_written_as_8_bit_rgb() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out").join("wall.png");
    let diagram = pl2_5_pro_diagram(3, 2)?;

    write_diagram_png(&diagram, &path)?;

    let decoder = Decoder::new(File::open(&path)?);
    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    assert_eq!((info.width, info.height), (diagram.size.width, diagram.size.height));
    assert_eq!(info.color_type, ColorType::Rgb);
    assert_eq!(info.bit_depth, BitDepth::Eight);

    let expected = render_diagram(&diagram).to_rgb_bytes();
    assert_eq!(&buffer[..info.buffer_size()], expected.as_slice());
    Ok(())
}
