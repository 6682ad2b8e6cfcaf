//! Panel product descriptions: physical size, pixel pitch, weight, power, rigging
//! headers, and processing and power capacities.
//!
//! A [`PanelSpec`] is what a catalog stores and what a form edits. Before any
//! calculation it is validated and resolved into a [`ResolvedPanel`], which has every
//! optional capacity filled in from the defaults below. Calculators only accept a
//! `ResolvedPanel`, so fallback values are applied in exactly one place.
//!
//! # Example
//!
//! ```rust
//! use ledwall_kit::panel::{PanelSpec, MAX_PORTS_DEFAULT};
//!
//! let spec = PanelSpec::new("tile", "Demo Tile", "Acme", 500.0, 500.0, 2.5, 6.2, 160.0);
//! let panel = spec.resolve()?;
//!
//! assert_eq!(panel.pixels_per_panel(), 40_000);
//! assert_eq!(panel.pixels_per_port(), 65_536);
//! assert_eq!(panel.max_ports(), MAX_PORTS_DEFAULT);
//! # Ok::<(), ledwall_kit::Error>(())
//! ```

pub mod defaults;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of ports on one processing controller (`16`).
pub const MAX_PORTS_DEFAULT: u32 = 16;

/// Default wattage one power line may carry (`3600.0` W, a 16 A circuit at 230 V).
pub const MAX_WATTS_PER_LINE_DEFAULT: f64 = 3600.0;

/// How rigging headers attach to the suspension point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    /// Shackle through an eye on the header.
    #[default]
    Shackle,
    /// Truss clamp.
    Clamp,
}

/// Weight and attachment points of one header type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaderSpec {
    /// Kilograms per header.
    pub weight: f64,
    /// Suspension points per header.
    pub points: u32,
}

/// Rigging headers for a one-panel-wide (`single`) and two-panel-wide (`double`) span.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    /// Header spanning one panel.
    pub single: HeaderSpec,
    /// Header spanning two panels.
    pub double: HeaderSpec,
    /// How headers attach.
    pub attachment_type: AttachmentType,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            single: HeaderSpec {
                weight: 0.6,
                points: 1,
            },
            double: HeaderSpec {
                weight: 1.0,
                points: 2,
            },
            attachment_type: AttachmentType::Shackle,
        }
    }
}

/// Data-output limits of the processing controller driving the panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortConfig {
    /// Maximum addressable pixels on one port.
    pub pixels_per_port: u32,
    /// Ports available on one controller.
    pub max_ports: u32,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            pixels_per_port: 65_536,
            max_ports: MAX_PORTS_DEFAULT,
        }
    }
}

/// Electrical limit of one power circuit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerConfig {
    /// Maximum wattage one line may carry.
    pub max_watts_per_line: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            max_watts_per_line: MAX_WATTS_PER_LINE_DEFAULT,
        }
    }
}

/// One LED panel product as stored in a catalog.
///
/// Field names serialize in camelCase, so catalogs exported as JSON by the browser
/// planner load without conversion.
///
/// Values are never mutated in place by this crate; an edit builds a new `PanelSpec`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSpec {
    /// Opaque catalog identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display manufacturer.
    pub manufacturer: String,
    /// Panel width in millimeters.
    pub width: f64,
    /// Panel height in millimeters.
    pub height: f64,
    /// Millimeters between pixel centers.
    pub pixel_pitch: f64,
    /// Kilograms per panel.
    pub weight: f64,
    /// Watts per panel at full load.
    pub power: f64,
    /// Rigging headers.
    pub header_config: HeaderConfig,
    /// Processing limits; `None` means one panel per port and [`MAX_PORTS_DEFAULT`] ports.
    #[serde(default)]
    pub port_config: Option<PortConfig>,
    /// Power limits; `None` means [`MAX_WATTS_PER_LINE_DEFAULT`].
    #[serde(default)]
    pub power_config: Option<PowerConfig>,
    /// Pixels one controller output can drive. Informational.
    pub controller_output_capacity: u64,
    /// Panels per transport case.
    pub flight_case_capacity: u32,
}

impl PanelSpec {
    /// Build a spec with catalog-style defaults for everything but the physical data.
    ///
    /// Headers default to [`HeaderConfig::default`], ports to 65536 pixels × 16,
    /// power lines to 3600 W, and cases to 10 panels.
    #[must_use]
    #[allow(clippy::too_many_arguments, reason = "mirrors the catalog columns")]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        width: f64,
        height: f64,
        pixel_pitch: f64,
        weight: f64,
        power: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manufacturer: manufacturer.into(),
            width,
            height,
            pixel_pitch,
            weight,
            power,
            header_config: HeaderConfig::default(),
            port_config: Some(PortConfig::default()),
            power_config: Some(PowerConfig::default()),
            controller_output_capacity: 655_360,
            flight_case_capacity: 10,
        }
    }

    /// Copy with a different header configuration.
    #[must_use]
    pub fn with_header_config(self, header_config: HeaderConfig) -> Self {
        Self {
            header_config,
            ..self
        }
    }

    /// Copy with a different (or absent) port configuration.
    #[must_use]
    pub fn with_port_config(self, port_config: Option<PortConfig>) -> Self {
        Self {
            port_config,
            ..self
        }
    }

    /// Copy with a different (or absent) power configuration.
    #[must_use]
    pub fn with_power_config(self, power_config: Option<PowerConfig>) -> Self {
        Self {
            power_config,
            ..self
        }
    }

    /// Copy with a different flight-case capacity.
    #[must_use]
    pub fn with_flight_case_capacity(self, flight_case_capacity: u32) -> Self {
        Self {
            flight_case_capacity,
            ..self
        }
    }

    /// Check every invariant without resolving.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] naming the first field that breaks its invariant.
    pub fn validate(&self) -> Result<()> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive("pixelPitch", self.pixel_pitch)?;
        require_positive("weight", self.weight)?;
        require_positive("power", self.power)?;
        require_non_negative("headerConfig.single.weight", self.header_config.single.weight)?;
        require_non_negative("headerConfig.double.weight", self.header_config.double.weight)?;
        if let Some(port_config) = &self.port_config {
            if port_config.pixels_per_port == 0 {
                return Err(invalid("portConfig.pixelsPerPort", "must be greater than zero"));
            }
            if port_config.max_ports == 0 {
                return Err(invalid("portConfig.maxPorts", "must be greater than zero"));
            }
        }
        if let Some(power_config) = &self.power_config {
            require_positive("powerConfig.maxWattsPerLine", power_config.max_watts_per_line)?;
        }
        if self.flight_case_capacity == 0 {
            return Err(invalid("flightCaseCapacity", "must be greater than zero"));
        }
        if raw_pixels_per_panel(self.width, self.height, self.pixel_pitch) == 0 {
            return Err(invalid("pixelPitch", "leaves less than one pixel per panel"));
        }
        Ok(())
    }

    /// Validate and fill every optional capacity with its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] if [`validate`](Self::validate) fails. Invalid
    /// values are reported, never replaced by defaults.
    pub fn resolve(&self) -> Result<ResolvedPanel> {
        self.validate()?;
        let pixels_per_panel = raw_pixels_per_panel(self.width, self.height, self.pixel_pitch);
        let (pixels_per_port, max_ports) = match self.port_config {
            Some(port_config) => (u64::from(port_config.pixels_per_port), port_config.max_ports),
            None => (pixels_per_panel, MAX_PORTS_DEFAULT),
        };
        let max_watts_per_line = self
            .power_config
            .map_or(MAX_WATTS_PER_LINE_DEFAULT, |power_config| power_config.max_watts_per_line);

        Ok(ResolvedPanel {
            spec: self.clone(),
            pixels_per_panel,
            pixels_per_port,
            max_ports,
            max_watts_per_line,
        })
    }
}

/// A validated [`PanelSpec`] with all fallback capacities applied.
///
/// Construct with [`PanelSpec::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPanel {
    spec: PanelSpec,
    pixels_per_panel: u64,
    pixels_per_port: u64,
    max_ports: u32,
    max_watts_per_line: f64,
}

impl ResolvedPanel {
    /// The spec this was resolved from.
    #[must_use]
    pub const fn spec(&self) -> &PanelSpec {
        &self.spec
    }

    /// Pixels on one panel, `floor((width / pitch) * (height / pitch))`.
    #[must_use]
    pub const fn pixels_per_panel(&self) -> u64 {
        self.pixels_per_panel
    }

    /// Pixels one port can address.
    #[must_use]
    pub const fn pixels_per_port(&self) -> u64 {
        self.pixels_per_port
    }

    /// Ports per controller.
    #[must_use]
    pub const fn max_ports(&self) -> u32 {
        self.max_ports
    }

    /// Watts one power line can carry.
    #[must_use]
    pub const fn max_watts_per_line(&self) -> f64 {
        self.max_watts_per_line
    }
}

fn raw_pixels_per_panel(width: f64, height: f64, pixel_pitch: f64) -> u64 {
    ((width / pixel_pitch) * (height / pixel_pitch)).floor() as u64
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    // NaN fails this comparison too.
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number greater than zero"))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number of zero or more"))
    }
}

const fn invalid(field: &'static str, reason: &'static str) -> Error {
    Error::InvalidSpec { field, reason }
}
