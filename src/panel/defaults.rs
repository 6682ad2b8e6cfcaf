//! Built-in catalog of common rental panels.
//!
//! Used to seed a [`MemoryCatalog`](crate::catalog::MemoryCatalog) and as realistic
//! fixtures in tests and demos.

use super::{AttachmentType, HeaderConfig, HeaderSpec, PanelSpec, PortConfig, PowerConfig};

/// Id of the ROE Black Pearl BP2V2 entry.
pub const BLACK_PEARL_BP2V2: &str = "bp2v2";
/// Id of the Absen PL2.5 Pro entry.
pub const ABSEN_PL2_5_PRO: &str = "pl2.5pro";
/// Id of the ROE Carbon CB8 entry.
pub const CARBON_CB8: &str = "cb8";
/// Id of the Martin Face 5 HC entry.
pub const FACE_5_HC: &str = "face5hc";

/// All built-in panels, in catalog order.
#[must_use]
pub fn default_panels() -> Vec<PanelSpec> {
    vec![
        catalog_panel(
            BLACK_PEARL_BP2V2,
            "ROE Black Pearl BP2V2",
            "ROE Visual",
            (500.0, 1000.0, 2.8),
            (11.8, 180.0),
            ((0.8, 1.2), 8),
        ),
        catalog_panel(
            ABSEN_PL2_5_PRO,
            "Absen PL2.5 Pro",
            "Absen",
            (500.0, 500.0, 2.5),
            (6.2, 160.0),
            ((0.6, 1.0), 12),
        ),
        catalog_panel(
            CARBON_CB8,
            "ROE Carbon CB8",
            "ROE Visual",
            (500.0, 1000.0, 8.0),
            (28.0, 750.0),
            ((1.2, 1.8), 4),
        ),
        catalog_panel(
            FACE_5_HC,
            "Martin Face 5 HC",
            "Martin Professional",
            (400.0, 400.0, 5.0),
            (7.5, 140.0),
            ((0.7, 1.1), 10),
        ),
    ]
}

/// Look up a built-in panel by id.
#[must_use]
pub fn default_panel(id: &str) -> Option<PanelSpec> {
    default_panels().into_iter().find(|panel| panel.id == id)
}

// (width, height, pitch), (weight, power), ((single header kg, double header kg), per case)
fn catalog_panel(
    id: &str,
    name: &str,
    manufacturer: &str,
    (width, height, pixel_pitch): (f64, f64, f64),
    (weight, power): (f64, f64),
    ((single_weight, double_weight), flight_case_capacity): ((f64, f64), u32),
) -> PanelSpec {
    PanelSpec {
        id: id.to_owned(),
        name: name.to_owned(),
        manufacturer: manufacturer.to_owned(),
        width,
        height,
        pixel_pitch,
        weight,
        power,
        header_config: HeaderConfig {
            single: HeaderSpec {
                weight: single_weight,
                points: 1,
            },
            double: HeaderSpec {
                weight: double_weight,
                points: 2,
            },
            attachment_type: AttachmentType::Shackle,
        },
        port_config: Some(PortConfig {
            pixels_per_port: 65_536,
            max_ports: 16,
        }),
        power_config: Some(PowerConfig {
            max_watts_per_line: 3600.0,
        }),
        controller_output_capacity: 655_360,
        flight_case_capacity,
    }
}
