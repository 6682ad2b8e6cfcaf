//! Planning tools for LED video walls built from rectangular panels.
//!
//! Pick a [`PanelSpec`](panel::PanelSpec), choose how many panels go across and
//! down, and `ledwall-kit` works out the rest:
//!
//! - [`wall::compute`]: physical size, resolution, weight, power, power lines,
//!   rigging headers, processing ports and controllers, flight cases.
//! - [`wall::layout`]: serpentine ("snake") numbering of the panels from any of
//!   four starting edges.
//! - [`wall::grouping`]: splitting the snake into data-port and power-line runs
//!   that end at row or column edges where they can.
//! - [`diagram`] and `to_png`: a drawable wall diagram with colored port paths.
//! - [`report`]: the page-one text summary.
//! - [`catalog`]: keeping panel specs in memory or in a file.
//!
//! # Glossary
//!
//! - **Snake / serpentine numbering:** consecutive panels are physically adjacent;
//!   the direction reverses on every row (or column).
//! - **Header:** rigging bar across the top of the wall, spanning one or two panels.
//! - **Port:** one controller output; panels are daisy-chained along it.
//! - **Power line:** one electrical circuit feeding a run of panels.
//! - **Boundary:** the last panel of a row (or column) in snake order.

pub mod catalog;
pub mod diagram;
mod error;
pub mod panel;
pub mod report;
#[cfg(feature = "host")]
pub mod to_png;
pub mod wall;

pub use crate::error::{Error, Result};
