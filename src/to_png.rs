#![cfg(feature = "host")]
//! Draw a [`WallDiagram`] with `embedded-graphics` and save it as a PNG.
//!
//! [`draw_diagram`] works on any `DrawTarget<Color = Rgb888>`, so the same
//! drawing code can target a display or the in-memory [`Canvas`] that
//! [`write_diagram_png`] encodes.

use core::convert::Infallible;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use embedded_graphics::{
    Pixel,
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Polyline, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Triangle},
    text::{Alignment, Text},
};
use png::{BitDepth, ColorType, Encoder};
use tracing::info;

use crate::diagram::{HEADER_HEIGHT, PANEL_SIZE, WallDiagram};
use crate::panel::AttachmentType;

/// Canvas background.
pub const BACKGROUND: Rgb888 = Rgb888::new(0xF4, 0xF4, 0xF5);
/// Fill of a panel some port reaches.
pub const PANEL_FILL: Rgb888 = Rgb888::new(0x2A, 0x2D, 0x34);
/// Fill of a panel no port reaches.
pub const UNCOVERED_FILL: Rgb888 = Rgb888::new(0x7F, 0x1D, 0x1D);
/// Panel outline.
pub const PANEL_STROKE: Rgb888 = Rgb888::new(0x52, 0x52, 0x5B);
/// Header bars and attachment hardware.
pub const HEADER_FILL: Rgb888 = Rgb888::new(0xF9, 0x73, 0x16);
/// Numbers and labels drawn on panels.
pub const PANEL_TEXT: Rgb888 = Rgb888::new(0xE4, 0xE4, 0xE7);
/// Legend text.
pub const LEGEND_TEXT: Rgb888 = Rgb888::new(0x18, 0x18, 0x1B);

const PATH_STROKE_WIDTH: u32 = 2;
const DOT_DIAMETER: u32 = 7;
const ATTACHMENT_SIZE: u32 = 8;
const HEADER_BAR_HEIGHT: u32 = 8;

/// An owned RGB pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl Canvas {
    /// A `size` canvas filled with `background`.
    #[must_use]
    pub fn new(size: Size, background: Rgb888) -> Self {
        let len = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![background; len],
        }
    }

    /// Color at `point`, `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|index| self.pixels[index])
    }

    /// Row-major 8-bit RGB bytes.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| [color.r(), color.g(), color.b()])
            .collect()
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index(point) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

/// Draw `diagram` onto `target`: headers, panel boxes, port paths, then the legend.
///
/// # Errors
///
/// Returns the target's error if a primitive fails to draw.
pub fn draw_diagram<D>(diagram: &WallDiagram, target: &mut D) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(BACKGROUND)?;
    draw_headers(diagram, target)?;
    draw_panels(diagram, target)?;
    draw_port_paths(diagram, target)?;
    draw_legend(diagram, target)
}

/// Rasterize `diagram` at one pixel per diagram unit.
#[must_use]
pub fn render_diagram(diagram: &WallDiagram) -> Canvas {
    let mut canvas = Canvas::new(diagram.size, BACKGROUND);
    let Ok(()) = draw_diagram(diagram, &mut canvas);
    canvas
}

/// Rasterize `diagram` and write it to `output_path` as an 8-bit RGB PNG.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the PNG cannot be encoded.
pub fn write_diagram_png(diagram: &WallDiagram, output_path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let canvas = render_diagram(diagram);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), canvas.size.width, canvas.size.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&canvas.to_rgb_bytes())?;
    writer.finish()?;
    info!(
        "Wrote {}x{} wall diagram to {}",
        canvas.size.width,
        canvas.size.height,
        output_path.display()
    );
    Ok(())
}

fn draw_headers<D>(diagram: &WallDiagram, target: &mut D) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let bar_offset = Point::new(0, ((HEADER_HEIGHT - HEADER_BAR_HEIGHT) / 2) as i32);
    let fill = PrimitiveStyle::with_fill(HEADER_FILL);
    let hardware = match diagram.attachment_type {
        AttachmentType::Shackle => PrimitiveStyle::with_stroke(HEADER_FILL, 2),
        AttachmentType::Clamp => fill,
    };

    for header in &diagram.headers {
        Rectangle::new(header.top_left + bar_offset, Size::new(header.width, HEADER_BAR_HEIGHT))
            .into_styled(fill)
            .draw(target)?;
        for &point in &header.attachment_points {
            match diagram.attachment_type {
                AttachmentType::Shackle => Circle::with_center(point, ATTACHMENT_SIZE)
                    .into_styled(hardware)
                    .draw(target)?,
                AttachmentType::Clamp => {
                    Rectangle::with_center(point, Size::new(ATTACHMENT_SIZE, ATTACHMENT_SIZE))
                        .into_styled(hardware)
                        .draw(target)?;
                }
            }
        }
    }
    Ok(())
}

fn draw_panels<D>(diagram: &WallDiagram, target: &mut D) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let text_style = MonoTextStyle::new(&FONT_6X10, PANEL_TEXT);
    for panel in &diagram.panels {
        let fill = if panel.port.is_some() { PANEL_FILL } else { UNCOVERED_FILL };
        let style = PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(PANEL_STROKE)
            .stroke_width(1)
            .build();
        Rectangle::new(panel.top_left, Size::new(PANEL_SIZE, PANEL_SIZE))
            .into_styled(style)
            .draw(target)?;
        Text::new(&panel.label, panel.top_left + Point::new(4, 12), text_style).draw(target)?;
        Text::with_alignment(
            &panel.sequence_number.to_string(),
            panel.center + Point::new(0, 20),
            text_style,
            Alignment::Center,
        )
        .draw(target)?;
    }
    Ok(())
}

fn draw_port_paths<D>(diagram: &WallDiagram, target: &mut D) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for path in &diagram.port_paths {
        let fill = PrimitiveStyle::with_fill(path.color);
        Polyline::new(&path.points)
            .into_styled(PrimitiveStyle::with_stroke(path.color, PATH_STROKE_WIDTH))
            .draw(target)?;
        for &point in &path.points {
            Circle::with_center(point, DOT_DIAMETER).into_styled(fill).draw(target)?;
        }
        for arrow in &path.arrows {
            Triangle::new(arrow.tip, arrow.left, arrow.right)
                .into_styled(fill)
                .draw(target)?;
        }
        Text::new(&path.label, path.label_at, MonoTextStyle::new(&FONT_6X10, path.color)).draw(target)?;
    }
    Ok(())
}

fn draw_legend<D>(diagram: &WallDiagram, target: &mut D) -> core::result::Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let text_style = MonoTextStyle::new(&FONT_6X10, LEGEND_TEXT);
    for entry in &diagram.legend {
        Circle::with_center(entry.at, ATTACHMENT_SIZE)
            .into_styled(PrimitiveStyle::with_fill(entry.color))
            .draw(target)?;
        Text::new(&entry.label, entry.at + Point::new(8, 4), text_style).draw(target)?;
    }
    Ok(())
}
