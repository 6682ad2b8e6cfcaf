//! Screen geometry and resource totals for a rectangular wall of panels.
//!
//! [`compute`] turns a [`ResolvedPanel`] and a [`GridSize`] into a
//! [`CalculationResult`]: physical size, resolution, weight, power and power lines,
//! rigging, processing ports and controllers, and flight cases. The result is a
//! plain value; recompute it whenever the panel or grid changes.
//!
//! Snake numbering lives in [`layout`], port and power-line grouping in
//! [`grouping`], and header placement in [`rigging`].
//!
//! # Example
//!
//! ```rust
//! use ledwall_kit::panel::defaults::{default_panel, ABSEN_PL2_5_PRO};
//! use ledwall_kit::wall::{compute, layout::GridSize};
//!
//! let panel = default_panel(ABSEN_PL2_5_PRO).expect("built-in panel").resolve()?;
//! let result = compute(&panel, GridSize::new(4, 2)?);
//!
//! assert_eq!(result.total_panels, 8);
//! assert_eq!((result.resolution.horizontal, result.resolution.vertical), (800, 400));
//! assert_eq!(result.rigging.double_headers, 2);
//! assert_eq!(result.flight_cases, 1);
//! # Ok::<(), ledwall_kit::Error>(())
//! ```

pub mod grouping;
pub mod layout;
pub mod rigging;

use core::num::{NonZeroU64, NonZeroUsize};

use serde::Serialize;
use tracing::{debug, warn};

use crate::Result;
use crate::panel::{PanelSpec, ResolvedPanel};
use layout::{GridSize, NumberingDirection, WallLayout};
use rigging::RiggingSummary;

/// A per-port or per-line panel capacity.
///
/// `raw` is the floored ratio before clamping. When one panel alone exceeds the
/// budget, `raw` is zero and the usable capacity is clamped to one panel; the
/// resulting port or line is over budget but still counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Capacity {
    raw: u64,
    effective: NonZeroU64,
}

impl Capacity {
    /// Capacity from a floored ratio, clamped to at least one panel.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        let effective = match NonZeroU64::new(raw) {
            Some(effective) => effective,
            None => NonZeroU64::MIN,
        };
        Self { raw, effective }
    }

    /// Floored ratio before clamping. Zero means one panel exceeds the budget.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.raw
    }

    /// Panels actually assigned per port or line.
    #[must_use]
    pub const fn effective(self) -> NonZeroU64 {
        self.effective
    }

    /// Whether the capacity was raised from zero to one.
    #[must_use]
    pub const fn is_clamped(self) -> bool {
        self.raw == 0
    }

    /// [`effective`](Self::effective) as a group size, saturating on narrow targets.
    #[must_use]
    pub fn as_group_size(self) -> NonZeroUsize {
        usize::try_from(self.effective.get())
            .ok()
            .and_then(NonZeroUsize::new)
            .unwrap_or(NonZeroUsize::MAX)
    }
}

/// Screen size in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Dimensions {
    /// Meters across.
    pub width: f64,
    /// Meters down.
    pub height: f64,
}

/// Screen resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Pixels across.
    pub horizontal: u64,
    /// Pixels down.
    pub vertical: u64,
    /// `horizontal * vertical`.
    pub total: u64,
}

/// Processing ports and controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PortSummary {
    /// Pixels on one panel.
    pub pixels_per_panel: u64,
    /// Pixels one port can address.
    pub pixels_per_port: u64,
    /// Panels chained on one port.
    pub panels_per_port: Capacity,
    /// Ports for the whole wall.
    pub total_ports: u64,
    /// Ports on one controller.
    pub ports_per_controller: u32,
    /// Controllers for the whole wall.
    pub controllers_needed: u64,
}

/// Power circuits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PowerLineSummary {
    /// Watts one line may carry.
    pub max_watts_per_line: f64,
    /// Panels on one line.
    pub panels_per_line: Capacity,
    /// Lines for the whole wall.
    pub lines_needed: u64,
    /// Watts drawn by the whole wall at full load.
    pub total_power_load: f64,
}

/// Everything derived from one panel and one grid size.
///
/// Always recomputed, never stored as authoritative state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    /// The grid this was computed for.
    pub grid: GridSize,
    /// `horizontal * vertical`.
    pub total_panels: u32,
    /// Physical size.
    pub dimensions: Dimensions,
    /// Pixel counts.
    pub resolution: Resolution,
    /// Kilograms of panels plus header hardware.
    pub weight: f64,
    /// Watts at full load.
    pub power: f64,
    /// Power circuits.
    pub power_lines: PowerLineSummary,
    /// Header hardware.
    pub rigging: RiggingSummary,
    /// Processing ports and controllers.
    pub ports: PortSummary,
    /// Transport cases.
    pub flight_cases: u64,
}

/// Compute every total for `panel` tiled `size.horizontal()` × `size.vertical()`.
///
/// Total over valid inputs: a [`ResolvedPanel`] has already passed validation and
/// a [`GridSize`] cannot be empty, so no division here can be by zero.
#[must_use]
pub fn compute(panel: &ResolvedPanel, size: GridSize) -> CalculationResult {
    let spec = panel.spec();
    let horizontal = size.horizontal();
    let vertical = size.vertical();
    let total_panels = size.panel_count();
    let panel_count = u64::from(total_panels);

    let dimensions = Dimensions {
        width: f64::from(horizontal) * spec.width / 1000.0,
        height: f64::from(vertical) * spec.height / 1000.0,
    };

    let horizontal_resolution = (f64::from(horizontal) * spec.width / spec.pixel_pitch).floor() as u64;
    let vertical_resolution = (f64::from(vertical) * spec.height / spec.pixel_pitch).floor() as u64;
    let resolution = Resolution {
        horizontal: horizontal_resolution,
        vertical: vertical_resolution,
        total: horizontal_resolution.saturating_mul(vertical_resolution),
    };

    let rigging = rigging::rigging(horizontal, &spec.header_config);
    let weight = f64::from(total_panels) * spec.weight + rigging.weight;
    let power = f64::from(total_panels) * spec.power;

    let panels_per_port = Capacity::from_raw(panel.pixels_per_port() / panel.pixels_per_panel());
    if panels_per_port.is_clamped() {
        warn!(
            "Panel {}: {} pixels exceed one port's {} pixel budget, assigning one panel per port",
            spec.id,
            panel.pixels_per_panel(),
            panel.pixels_per_port()
        );
    }
    let total_ports = panel_count.div_ceil(panels_per_port.effective().get());
    let ports = PortSummary {
        pixels_per_panel: panel.pixels_per_panel(),
        pixels_per_port: panel.pixels_per_port(),
        panels_per_port,
        total_ports,
        ports_per_controller: panel.max_ports(),
        controllers_needed: total_ports.div_ceil(u64::from(panel.max_ports())),
    };

    let panels_per_line = Capacity::from_raw((panel.max_watts_per_line() / spec.power).floor() as u64);
    if panels_per_line.is_clamped() {
        warn!(
            "Panel {}: {} W exceeds one line's {} W budget, assigning one panel per line",
            spec.id,
            spec.power,
            panel.max_watts_per_line()
        );
    }
    let power_lines = PowerLineSummary {
        max_watts_per_line: panel.max_watts_per_line(),
        panels_per_line,
        lines_needed: panel_count.div_ceil(panels_per_line.effective().get()),
        total_power_load: power,
    };

    let flight_cases = panel_count.div_ceil(u64::from(spec.flight_case_capacity));

    debug!(
        "Wall {}x{} of {}: {} ports, {} lines, {} cases",
        horizontal, vertical, spec.id, total_ports, power_lines.lines_needed, flight_cases
    );

    CalculationResult {
        grid: size,
        total_panels,
        dimensions,
        resolution,
        weight,
        power,
        power_lines,
        rigging,
        ports,
        flight_cases,
    }
}

/// Validate `spec`, resolve its defaults, and [`compute`] a `horizontal` × `vertical` wall.
///
/// # Errors
///
/// Returns [`Error::InvalidSpec`](crate::Error::InvalidSpec) for a bad spec and
/// [`Error::InvalidGrid`](crate::Error::InvalidGrid) for a bad grid.
pub fn calculate(spec: &PanelSpec, horizontal: u32, vertical: u32) -> Result<CalculationResult> {
    let panel = spec.resolve()?;
    let size = GridSize::new(horizontal, vertical)?;
    Ok(compute(&panel, size))
}

/// Panels needed to approximate `desired_mm` with panels `panel_mm` wide: the
/// nearest whole count, at least one.
///
/// ```rust
/// use ledwall_kit::wall::fit_panel_count;
///
/// assert_eq!(fit_panel_count(2_600.0, 500.0), 5);
/// assert_eq!(fit_panel_count(2_800.0, 500.0), 6);
/// assert_eq!(fit_panel_count(100.0, 500.0), 1);
/// ```
#[must_use]
pub fn fit_panel_count(desired_mm: f64, panel_mm: f64) -> u32 {
    let count = (desired_mm / panel_mm).round();
    if count.is_finite() && count >= 1.0 {
        // `as` saturates at u32::MAX.
        count as u32
    } else {
        1
    }
}

/// A grid size together with the numbering direction chosen for it.
///
/// This is transient session state: it is never persisted by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GridConfiguration {
    /// Panels across and down.
    pub size: GridSize,
    /// Where the snake starts.
    pub direction: NumberingDirection,
}

impl GridConfiguration {
    /// Grid of `horizontal` × `vertical` panels numbered from `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`](crate::Error::InvalidGrid) for a zero count or overflow.
    pub fn new(horizontal: u32, vertical: u32, direction: NumberingDirection) -> Result<Self> {
        Ok(Self {
            size: GridSize::new(horizontal, vertical)?,
            direction,
        })
    }

    /// Grid closest to a desired screen size in millimeters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`](crate::Error::InvalidGrid) if the fitted counts overflow.
    pub fn fit(
        panel: &ResolvedPanel,
        desired_width_mm: f64,
        desired_height_mm: f64,
        direction: NumberingDirection,
    ) -> Result<Self> {
        let spec = panel.spec();
        Self::new(
            fit_panel_count(desired_width_mm, spec.width),
            fit_panel_count(desired_height_mm, spec.height),
            direction,
        )
    }

    /// Snake layout of this grid.
    #[must_use]
    pub const fn layout(&self) -> WallLayout {
        WallLayout::new(self.size, self.direction)
    }

    /// `(actual - desired)` width and height in millimeters for `panel`.
    #[must_use]
    pub fn size_difference_mm(
        &self,
        panel: &ResolvedPanel,
        desired_width_mm: f64,
        desired_height_mm: f64,
    ) -> (f64, f64) {
        let spec = panel.spec();
        (
            f64::from(self.size.horizontal()) * spec.width - desired_width_mm,
            f64::from(self.size.vertical()) * spec.height - desired_height_mm,
        )
    }
}
