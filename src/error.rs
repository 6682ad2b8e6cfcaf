//! Error type and result alias shared by every module.

/// Errors returned by `ledwall-kit`.
///
/// A panel whose per-port pixel budget or per-line wattage budget is smaller than
/// one panel is *not* an error; see [`Capacity`](crate::wall::Capacity).
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum Error {
    /// A panel specification field breaks its invariant.
    #[display("invalid panel spec: `{field}` {reason}")]
    InvalidSpec {
        /// Name of the offending field, as written in the panel JSON.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The grid has a zero dimension, or more panels than fit in a `u32`.
    #[display("invalid grid {horizontal}x{vertical}: counts must be positive and their product must fit in u32")]
    InvalidGrid {
        /// Panels across.
        horizontal: u32,
        /// Panels down.
        vertical: u32,
    },

    /// No panel with this id exists in the catalog.
    #[display("panel `{_0}` not found")]
    PanelNotFound(#[error(not(source))] String),

    /// A stored catalog failed its length, CRC, or payload check.
    #[display("stored panel catalog is corrupted")]
    CatalogCorrupted,

    /// A catalog is too large for the file format's length field.
    #[display("panel catalog exceeds {max} bytes when serialized")]
    CatalogTooLarge {
        /// Largest payload the format can hold.
        max: usize,
    },

    /// Reading or writing catalog storage failed.
    #[display("catalog storage I/O failed: {_0}")]
    #[from]
    Io(std::io::Error),

    /// A JSON catalog could not be parsed or written.
    #[display("catalog JSON error: {_0}")]
    #[from]
    Json(serde_json::Error),
}

/// Result alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
