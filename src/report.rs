//! Page-one text summary of a planned wall.
//!
//! ```text
//! LED Screen Configuration
//!
//! Panel Information
//!   Model                  Absen PL2.5 Pro
//!   Manufacturer           Absen
//! Screen Configuration
//!   Panel Layout           4 × 2 panels (8 total), numbered L→R
//!   Total Size             2.00 m × 1.00 m
//!   ...
//! ```

use core::fmt;

use itertools::Itertools;

use crate::panel::{AttachmentType, ResolvedPanel};
use crate::wall::grouping::plan_ports;
use crate::wall::{CalculationResult, GridConfiguration, compute};

/// A computed wall and everything the summary page prints about it.
///
/// ```rust
/// use ledwall_kit::panel::defaults::{default_panel, ABSEN_PL2_5_PRO};
/// use ledwall_kit::report::WallReport;
/// use ledwall_kit::wall::{GridConfiguration, layout::NumberingDirection};
///
/// let panel = default_panel(ABSEN_PL2_5_PRO).expect("built-in panel").resolve()?;
/// let config = GridConfiguration::new(4, 2, NumberingDirection::Left)?;
/// let report = WallReport::new(&panel, config);
///
/// let text = report.to_string();
/// assert!(text.contains("4 × 2 panels"));
/// assert!(text.contains("51.6 kg"));
/// assert!(report.warnings().is_empty());
/// # Ok::<(), ledwall_kit::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WallReport<'a> {
    panel: &'a ResolvedPanel,
    config: GridConfiguration,
    result: CalculationResult,
    uncovered_panels: usize,
}

impl<'a> WallReport<'a> {
    /// Compute `config` for `panel` and lay out its ports.
    #[must_use]
    pub fn new(panel: &'a ResolvedPanel, config: GridConfiguration) -> Self {
        let result = compute(panel, config.size);
        let uncovered_panels = plan_ports(config.layout(), &result).uncovered();
        Self {
            panel,
            config,
            result,
            uncovered_panels,
        }
    }

    /// The computed totals.
    #[must_use]
    pub const fn result(&self) -> &CalculationResult {
        &self.result
    }

    /// The grid and numbering direction.
    #[must_use]
    pub const fn config(&self) -> &GridConfiguration {
        &self.config
    }

    /// Things an operator should check before building the wall.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let spec = self.panel.spec();
        let mut warnings = Vec::new();
        if self.result.ports.panels_per_port.is_clamped() {
            warnings.push(format!(
                "one panel ({} px) exceeds a port's {} px budget; each port carries one panel over budget",
                group_thousands(self.panel.pixels_per_panel()),
                group_thousands(self.panel.pixels_per_port())
            ));
        }
        if self.result.power_lines.panels_per_line.is_clamped() {
            warnings.push(format!(
                "one panel ({:.0} W) exceeds a line's {:.0} W budget; each line carries one panel over budget",
                spec.power,
                self.panel.max_watts_per_line()
            ));
        }
        if self.uncovered_panels > 0 {
            warnings.push(format!(
                "{} panels are beyond the {} ports of one controller and are not on the port diagram",
                self.uncovered_panels, self.result.ports.ports_per_controller
            ));
        }
        warnings
    }
}

impl fmt::Display for WallReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.panel.spec();
        let result = &self.result;
        let rigging = &result.rigging;

        writeln!(f, "LED Screen Configuration")?;
        writeln!(f)?;
        writeln!(f, "Panel Information")?;
        row(f, "Model", &spec.name)?;
        row(f, "Manufacturer", &spec.manufacturer)?;
        row(
            f,
            "Panel",
            format_args!(
                "{} × {} mm, {} mm pitch, {} kg, {} W",
                spec.width, spec.height, spec.pixel_pitch, spec.weight, spec.power
            ),
        )?;

        writeln!(f, "Screen Configuration")?;
        row(
            f,
            "Panel Layout",
            format_args!(
                "{} × {} panels ({} total), numbered {}",
                self.config.size.horizontal(),
                self.config.size.vertical(),
                result.total_panels,
                self.config.direction.label()
            ),
        )?;
        row(
            f,
            "Total Size",
            format_args!("{:.2} m × {:.2} m", result.dimensions.width, result.dimensions.height),
        )?;
        row(
            f,
            "Resolution",
            format_args!(
                "{} × {}",
                group_thousands(result.resolution.horizontal),
                group_thousands(result.resolution.vertical)
            ),
        )?;
        row(f, "Total Pixels", group_thousands(result.resolution.total))?;

        writeln!(f, "Technical Requirements")?;
        row(f, "Total Weight", format_args!("{:.1} kg", result.weight))?;
        row(f, "Power Consumption", format_args!("{:.0} W", result.power))?;
        row(
            f,
            "Power Lines",
            format_args!(
                "{} ({} panels per {:.0} W line)",
                result.power_lines.lines_needed,
                result.power_lines.panels_per_line.effective(),
                result.power_lines.max_watts_per_line
            ),
        )?;
        row(f, "Controllers Required", result.ports.controllers_needed)?;
        row(
            f,
            "Total Ports",
            format_args!(
                "{} ({} panels per port, {} ports per controller)",
                result.ports.total_ports,
                result.ports.panels_per_port.effective(),
                result.ports.ports_per_controller
            ),
        )?;
        row(f, "Flight Cases", result.flight_cases)?;

        writeln!(f, "Rigging Information")?;
        row(f, "Single Headers", rigging.single_headers)?;
        row(f, "Double Headers", rigging.double_headers)?;
        row(f, "Total Attachment Points", rigging.total_points)?;
        row(
            f,
            "Attachment",
            match rigging.attachment_type {
                AttachmentType::Shackle => "shackle",
                AttachmentType::Clamp => "clamp",
            },
        )?;

        let warnings = self.warnings();
        if !warnings.is_empty() {
            writeln!(f, "Warnings")?;
            for warning in warnings {
                writeln!(f, "  ! {warning}")?;
            }
        }
        Ok(())
    }
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "  {label:<24} {value}")
}

// 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(String::from_utf8_lossy)
        .join(",")
}
