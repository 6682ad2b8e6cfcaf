//! Render-ready geometry for a wall diagram: numbered panel boxes, rigging headers,
//! and one colored path per data port.
//!
//! A [`WallDiagram`] holds no pixels. It places everything in a coordinate space
//! where one panel is [`PANEL_SIZE`] units square, and any renderer can draw from
//! it. [`to_png`](crate::to_png) draws it with `embedded-graphics`.
//!
//! ```text
//!   ●       ●   ●       ●        header band (attachment points)
//!  ┌───────────┬──────────┐
//!  │ R1C1      │ R1C2     │
//!  │    1 ───▶─┼──▶ 2     │      P1 path through panel centres
//!  ├───────────┼──────────┤
//!  │    4 ◀────┼─── 3     │
//!  └───────────┴──────────┘
//!   ● Port 1                      legend
//! ```

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb888;
use itertools::Itertools;

use crate::panel::AttachmentType;
use crate::wall::grouping::{LinePlan, plan_ports};
use crate::wall::layout::{Cell, NumberingDirection};
use crate::wall::rigging::{HeaderKind, HeaderRun, header_runs};
use crate::wall::{CalculationResult, GridConfiguration};

/// Side of one panel box, in diagram units.
pub const PANEL_SIZE: u32 = 100;
/// Gap between neighbouring panel boxes.
pub const PANEL_GAP: u32 = 2;
/// Height of the header band above the grid.
pub const HEADER_HEIGHT: u32 = 24;
/// Empty border around everything.
pub const MARGIN: u32 = 32;
/// Height of one legend row.
pub const LEGEND_ROW_HEIGHT: u32 = 16;
/// Width reserved for one legend entry.
pub const LEGEND_ENTRY_WIDTH: u32 = 80;

// An arrow every this many transitions, plus one on the last.
const ARROW_INTERVAL: usize = 3;
// Arrow position along its segment.
const ARROW_POSITION: f32 = 0.6;
const ARROW_LENGTH: f32 = 8.0;
const ARROW_HALF_WIDTH: f32 = 4.0;
// Port label offset from the first panel's centre.
const LABEL_OFFSET: Point = Point::new(-34, 5);

/// High-contrast palette for port paths; port `n` uses `PALETTE[n % PALETTE.len()]`.
pub const PALETTE: [Rgb888; 19] = [
    Rgb888::new(0xE6, 0x19, 0x4B),
    Rgb888::new(0x3C, 0xB4, 0x4B),
    Rgb888::new(0x00, 0x82, 0xC8),
    Rgb888::new(0xF5, 0x82, 0x30),
    Rgb888::new(0x91, 0x1E, 0xB4),
    Rgb888::new(0x46, 0xF0, 0xF0),
    Rgb888::new(0xF0, 0x32, 0xE6),
    Rgb888::new(0xD2, 0xF5, 0x3C),
    Rgb888::new(0xFA, 0xBE, 0xBE),
    Rgb888::new(0x00, 0x80, 0x80),
    Rgb888::new(0xE6, 0xBE, 0xFF),
    Rgb888::new(0xAA, 0x6E, 0x28),
    Rgb888::new(0xFF, 0xE1, 0x19),
    Rgb888::new(0x80, 0x00, 0x00),
    Rgb888::new(0x82, 0xB6, 0xE9),
    Rgb888::new(0x9A, 0x63, 0x24),
    Rgb888::new(0xA9, 0xA9, 0xA9),
    Rgb888::new(0xFF, 0xFF, 0xFF),
    Rgb888::new(0x00, 0x00, 0x00),
];

/// Palette color for zero-based group `index`.
#[must_use]
pub const fn line_color(index: usize) -> Rgb888 {
    PALETTE[index % PALETTE.len()]
}

/// One panel box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelBox {
    /// Grid position.
    pub cell: Cell,
    /// One-based snake number, drawn in the centre.
    pub sequence_number: u32,
    /// `R{row}C{col}` corner label.
    pub label: String,
    /// Top-left corner.
    pub top_left: Point,
    /// Centre, where port paths pass through.
    pub center: Point,
    /// Zero-based port containing this panel, `None` if no port reaches it.
    pub port: Option<usize>,
}

/// One rigging header drawn above the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderGlyph {
    /// Which header and where.
    pub run: HeaderRun,
    /// Top-left of the header band segment.
    pub top_left: Point,
    /// Width covered.
    pub width: u32,
    /// Where shackles or clamps attach.
    pub attachment_points: Vec<Point>,
}

/// A direction arrow on a port path, as a filled triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrow {
    /// Point of the arrow, facing along the path.
    pub tip: Point,
    /// Back corner on one side.
    pub left: Point,
    /// Back corner on the other side.
    pub right: Point,
}

/// The drawn path of one port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortPath {
    /// Zero-based port number.
    pub index: usize,
    /// Path color.
    pub color: Rgb888,
    /// Panel centres in chain order.
    pub points: Vec<Point>,
    /// Direction markers.
    pub arrows: Vec<Arrow>,
    /// `P{n} ({first}-{last})`.
    pub label: String,
    /// Where the label's baseline starts.
    pub label_at: Point,
}

/// One legend swatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    /// Swatch color.
    pub color: Rgb888,
    /// `Port {n}`.
    pub label: String,
    /// Swatch centre.
    pub at: Point,
}

/// Everything needed to draw one wall.
///
/// ```rust
/// use ledwall_kit::diagram::WallDiagram;
/// use ledwall_kit::panel::defaults::{default_panel, ABSEN_PL2_5_PRO};
/// use ledwall_kit::wall::{compute, GridConfiguration, layout::NumberingDirection};
///
/// let panel = default_panel(ABSEN_PL2_5_PRO).expect("built-in panel").resolve()?;
/// let config = GridConfiguration::new(4, 2, NumberingDirection::Left)?;
/// let result = compute(&panel, config.size);
/// let diagram = WallDiagram::new(&config, &result);
///
/// assert_eq!(diagram.panels.len(), 8);
/// assert_eq!(diagram.headers.len(), 2);
/// // 40,000-pixel panels on 65,536-pixel ports: one panel per port.
/// assert_eq!(diagram.port_paths.len(), 8);
/// assert_eq!(diagram.port_paths[0].label, "P1 (1-1)");
/// # Ok::<(), ledwall_kit::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallDiagram {
    /// Canvas size in diagram units.
    pub size: Size,
    /// Numbering direction, for captions.
    pub direction: NumberingDirection,
    /// Header attachment style.
    pub attachment_type: AttachmentType,
    /// Panel boxes, row by row.
    pub panels: Vec<PanelBox>,
    /// Headers from left to right.
    pub headers: Vec<HeaderGlyph>,
    /// Port paths in port order.
    pub port_paths: Vec<PortPath>,
    /// Legend swatches in port order.
    pub legend: Vec<LegendEntry>,
    /// Panels no port reaches.
    pub uncovered: usize,
}

impl WallDiagram {
    /// Lay out `config` using the port plan of `result`.
    #[must_use]
    pub fn new(config: &GridConfiguration, result: &CalculationResult) -> Self {
        let plan = plan_ports(config.layout(), result);
        Self::from_plan(&plan, result)
    }

    /// Lay out an existing port plan.
    #[must_use]
    pub fn from_plan(plan: &LinePlan, result: &CalculationResult) -> Self {
        let layout = plan.layout();
        let grid = layout.size();
        let grid_width = span(grid.horizontal());
        let grid_height = span(grid.vertical());
        let origin = Point::new(coord(MARGIN), coord(MARGIN + HEADER_HEIGHT));

        let panels = grid
            .cells()
            .map(|cell| {
                let top_left = origin + cell_offset(cell);
                PanelBox {
                    cell,
                    // Every cell of the grid has a number.
                    sequence_number: layout.sequence_number(cell).unwrap_or_default(),
                    label: cell.to_string(),
                    top_left,
                    center: top_left + half_panel(),
                    port: plan.group_of(cell).map(|group| group.index()),
                }
            })
            .collect();

        let headers = header_runs(grid.horizontal())
            .into_iter()
            .map(|run| header_glyph(run, origin))
            .collect();

        let port_paths = plan
            .groups()
            .iter()
            .map(|group| {
                let cells = plan.cells(group);
                let points: Vec<Point> = cells
                    .iter()
                    .map(|&cell| origin + cell_offset(cell) + half_panel())
                    .collect();
                let first = cells.first().and_then(|&cell| layout.sequence_number(cell)).unwrap_or_default();
                let last = cells.last().and_then(|&cell| layout.sequence_number(cell)).unwrap_or_default();
                let label_at = points.first().copied().unwrap_or(origin) + LABEL_OFFSET;
                PortPath {
                    index: group.index(),
                    color: line_color(group.index()),
                    arrows: arrows(&points),
                    points,
                    label: format!("P{} ({first}-{last})", group.index() + 1),
                    label_at,
                }
            })
            .collect::<Vec<_>>();

        let per_row = (grid_width / LEGEND_ENTRY_WIDTH).max(1) as usize;
        let legend_top = origin.y + coord(grid_height) + coord(LEGEND_ROW_HEIGHT);
        let legend: Vec<LegendEntry> = port_paths
            .iter()
            .map(|path| {
                let column = path.index % per_row;
                let row = path.index / per_row;
                LegendEntry {
                    color: path.color,
                    label: format!("Port {}", path.index + 1),
                    at: Point::new(
                        origin.x + coord(column as u32 * LEGEND_ENTRY_WIDTH) + 6,
                        legend_top + coord(row as u32 * LEGEND_ROW_HEIGHT),
                    ),
                }
            })
            .collect();
        let legend_rows = legend.len().div_ceil(per_row) as u32;

        Self {
            size: Size::new(
                grid_width.saturating_add(2 * MARGIN),
                grid_height
                    .saturating_add(2 * MARGIN + HEADER_HEIGHT)
                    .saturating_add((legend_rows + 1) * LEGEND_ROW_HEIGHT),
            ),
            direction: layout.direction(),
            attachment_type: result.rigging.attachment_type,
            panels,
            headers,
            port_paths,
            legend,
            uncovered: plan.uncovered(),
        }
    }
}

// Width or height of `count` boxes with gaps between them.
fn span(count: u32) -> u32 {
    count
        .saturating_mul(PANEL_SIZE + PANEL_GAP)
        .saturating_sub(PANEL_GAP)
}

fn coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

const fn half_panel() -> Point {
    Point::new((PANEL_SIZE / 2) as i32, (PANEL_SIZE / 2) as i32)
}

fn cell_offset(cell: Cell) -> Point {
    let pitch = PANEL_SIZE + PANEL_GAP;
    Point::new(
        coord(cell.col.saturating_mul(pitch)),
        coord(cell.row.saturating_mul(pitch)),
    )
}

fn header_glyph(run: HeaderRun, origin: Point) -> HeaderGlyph {
    let top_left = origin + cell_offset(Cell::new(0, run.first_col)) - Point::new(0, coord(HEADER_HEIGHT));
    let width = span(run.kind.span());
    let attachment_points = match run.kind {
        HeaderKind::Single => vec![top_left + Point::new(coord(width / 2), 0)],
        HeaderKind::Double => vec![
            top_left + Point::new(coord(width / 4), 0),
            top_left + Point::new(coord(width * 3 / 4), 0),
        ],
    };
    HeaderGlyph {
        run,
        top_left,
        width,
        attachment_points,
    }
}

fn arrows(points: &[Point]) -> Vec<Arrow> {
    let last_transition = points.len().saturating_sub(1);
    points
        .iter()
        .tuple_windows()
        .enumerate()
        .map(|(offset, (prev, curr))| (offset + 1, prev, curr))
        .filter(|&(transition, _, _)| transition % ARROW_INTERVAL == 0 || transition == last_transition)
        .map(|(_, prev, curr)| arrow_between(*prev, *curr))
        .collect()
}

fn arrow_between(prev: Point, curr: Point) -> Arrow {
    let dx = (curr.x - prev.x) as f32;
    let dy = (curr.y - prev.y) as f32;
    let angle = dy.atan2(dx);
    let (sin, cos) = angle.sin_cos();
    let anchor_x = prev.x as f32 + dx * ARROW_POSITION;
    let anchor_y = prev.y as f32 + dy * ARROW_POSITION;
    let place = |along: f32, across: f32| {
        Point::new(
            (anchor_x + along * cos - across * sin).round() as i32,
            (anchor_y + along * sin + across * cos).round() as i32,
        )
    };
    Arrow {
        tip: place(0.0, 0.0),
        left: place(-ARROW_LENGTH, -ARROW_HALF_WIDTH),
        right: place(-ARROW_LENGTH, ARROW_HALF_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_every_third_transition_and_on_the_last() {
        let points: Vec<Point> = (0..6).map(|i| Point::new(i * 102, 0)).collect();
        // Transitions 1..=5: arrows on 3 and 5.
        let placed = arrows(&points);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].tip, Point::new(2 * 102 + 61, 0));
        assert_eq!(placed[1].tip, Point::new(4 * 102 + 61, 0));
    }

    #[test]
    fn arrow_points_along_a_downward_segment() {
        let arrow = arrow_between(Point::new(0, 0), Point::new(0, 100));
        assert_eq!(arrow.tip, Point::new(0, 60));
        assert_eq!(arrow.left, Point::new(4, 52));
        assert_eq!(arrow.right, Point::new(-4, 52));
    }

    #[test]
    fn single_panel_path_has_no_arrows() {
        assert!(arrows(&[Point::new(5, 5)]).is_empty());
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(line_color(0), line_color(PALETTE.len()));
        assert_ne!(line_color(0), line_color(1));
    }
}
