//! Rigging headers along the top of the wall.
//!
//! Headers are placed along the top row only: double headers cover pairs of
//! columns from the left and a single header covers the last column when the
//! count is odd. The header run is counted once per wall, not once per row.

use serde::Serialize;

use crate::panel::{AttachmentType, HeaderConfig};

/// Header width in panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderKind {
    /// Spans one panel.
    Single,
    /// Spans two panels.
    Double,
}

impl HeaderKind {
    /// Panels covered by this header.
    #[must_use]
    pub const fn span(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// One physical header and the first column it sits over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct HeaderRun {
    /// Header width.
    pub kind: HeaderKind,
    /// Zero-based leftmost column covered.
    pub first_col: u32,
}

/// Header counts and totals for one wall.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiggingSummary {
    /// Single headers needed.
    pub single_headers: u32,
    /// Double headers needed.
    pub double_headers: u32,
    /// Suspension points across all headers.
    pub total_points: u64,
    /// Kilograms of header hardware.
    pub weight: f64,
    /// How headers attach.
    pub attachment_type: AttachmentType,
}

/// `(single, double)` header counts for a wall `horizontal` panels wide.
///
/// | panels across | single | double |
/// |---|---|---|
/// | 1 | 1 | 0 |
/// | 2 | 0 | 1 |
/// | even | 0 | n / 2 |
/// | odd | 1 | n / 2 (floored) |
#[must_use]
pub const fn header_counts(horizontal: u32) -> (u32, u32) {
    // All four rows of the table collapse to parity and half.
    (horizontal % 2, horizontal / 2)
}

/// Header placement from left to right.
///
/// ```rust
/// use ledwall_kit::wall::rigging::{HeaderKind, HeaderRun, header_runs};
///
/// assert_eq!(
///     header_runs(3),
///     vec![
///         HeaderRun { kind: HeaderKind::Double, first_col: 0 },
///         HeaderRun { kind: HeaderKind::Single, first_col: 2 },
///     ]
/// );
/// ```
#[must_use]
pub fn header_runs(horizontal: u32) -> Vec<HeaderRun> {
    let mut runs = Vec::with_capacity(horizontal.div_ceil(2) as usize);
    let mut first_col = 0;
    while first_col < horizontal {
        let kind = if first_col + 1 < horizontal {
            HeaderKind::Double
        } else {
            HeaderKind::Single
        };
        runs.push(HeaderRun { kind, first_col });
        first_col += kind.span();
    }
    runs
}

/// Header counts, points, and weight for a wall `horizontal` panels wide.
#[must_use]
pub fn rigging(horizontal: u32, header_config: &HeaderConfig) -> RiggingSummary {
    let (single_headers, double_headers) = header_counts(horizontal);
    let total_points = u64::from(single_headers) * u64::from(header_config.single.points)
        + u64::from(double_headers) * u64::from(header_config.double.points);
    let weight = f64::from(single_headers) * header_config.single.weight
        + f64::from(double_headers) * header_config.double.weight;

    RiggingSummary {
        single_headers,
        double_headers,
        total_points,
        weight,
        attachment_type: header_config.attachment_type,
    }
}
