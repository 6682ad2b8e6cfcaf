//! Panel catalog storage: list, save, and delete [`PanelSpec`]s.
//!
//! [`PanelRepository`] is the seam the planner talks to. [`MemoryCatalog`] keeps
//! specs in a `Vec`; [`FileCatalog`] keeps the whole catalog in one file.
//!
//! # File format
//!
//! ```text
//! offset  size  field
//!      0     4  magic 'LWPC' (little-endian u32)
//!      4     4  FNV-1a hash of the stored Rust type name
//!      8     4  payload length n (little-endian u32)
//!     12     n  postcard-encoded Vec<PanelSpec>
//!   12+n     4  CRC32 of bytes 0..12+n
//! ```
//!
//! A missing or zero-length file reads as an empty catalog. Any other file that
//! lacks the magic or type hash, or has a bad length, CRC, or payload, is
//! [`Error::CatalogCorrupted`] and is left untouched by writes.
//!
//! Catalogs also import and export as JSON in the browser planner's camelCase
//! shape; see [`from_json`] and [`to_json`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::panel::PanelSpec;
use crate::panel::defaults::default_panels;
use crate::{Error, Result};

const MAGIC: u32 = 0x4C57_5043; // 'LWPC'
const HEADER_SIZE: usize = 4 + 4 + 4; // Magic + TypeHash + PayloadLen
const CRC_SIZE: usize = 4;
/// Largest postcard payload a [`FileCatalog`] will write or read.
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Where panel specs are kept.
///
/// Every method reads or rewrites the whole catalog; there is no partial update.
pub trait PanelRepository {
    /// Every stored spec, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn list(&self) -> Result<Vec<PanelSpec>>;

    /// Insert `spec`, or replace the stored spec with the same id.
    ///
    /// An empty id is replaced by one derived from the manufacturer and name.
    /// Returns the spec as stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpec`] if `spec` fails validation, or a storage error.
    fn upsert(&mut self, spec: PanelSpec) -> Result<PanelSpec>;

    /// Delete the spec with `id`. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or written.
    fn remove(&mut self, id: &str) -> Result<bool>;

    /// Whether the backing storage is reachable.
    fn ping(&self) -> bool;

    /// The spec with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PanelNotFound`] if no spec has that id.
    fn find(&self, id: &str) -> Result<PanelSpec> {
        self.list()?
            .into_iter()
            .find(|spec| spec.id == id)
            .ok_or_else(|| Error::PanelNotFound(id.to_owned()))
    }
}

/// A catalog held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryCatalog {
    panels: Vec<PanelSpec>,
}

impl MemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self { panels: Vec::new() }
    }

    /// A catalog seeded with the built-in panels.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            panels: default_panels(),
        }
    }
}

impl PanelRepository for MemoryCatalog {
    fn list(&self) -> Result<Vec<PanelSpec>> {
        Ok(self.panels.clone())
    }

    fn upsert(&mut self, spec: PanelSpec) -> Result<PanelSpec> {
        upsert_into(&mut self.panels, spec)
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        Ok(remove_from(&mut self.panels, id))
    }

    fn ping(&self) -> bool {
        true
    }
}

/// A catalog kept in a single file, rewritten on every change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// A catalog stored at `path`. Nothing is read or created until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the stored catalog with `panels`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogTooLarge`] if the encoded catalog exceeds
    /// [`MAX_PAYLOAD_SIZE`], or [`Error::Io`] if the file cannot be written.
    pub fn save(&self, panels: &[PanelSpec]) -> Result<()> {
        let bytes = encode(&panels.to_vec())?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, &bytes)?;
        info!(
            "Catalog: Saved {} panels ({} bytes) to {}",
            panels.len(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete the backing file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Catalog: Cleared {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn load(&self) -> Result<Vec<PanelSpec>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("Catalog: No data at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        if bytes.is_empty() {
            info!("Catalog: Empty file at {}", self.path.display());
            return Ok(Vec::new());
        }
        let panels = decode::<Vec<PanelSpec>>(&bytes).inspect_err(|_| {
            error!("Catalog: Refusing to use {}", self.path.display());
        })?;
        info!("Catalog: Loaded {} panels from {}", panels.len(), self.path.display());
        Ok(panels)
    }
}

impl PanelRepository for FileCatalog {
    fn list(&self) -> Result<Vec<PanelSpec>> {
        self.load()
    }

    fn upsert(&mut self, spec: PanelSpec) -> Result<PanelSpec> {
        let mut panels = self.load()?;
        let stored = upsert_into(&mut panels, spec)?;
        self.save(&panels)?;
        Ok(stored)
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        let mut panels = self.load()?;
        let removed = remove_from(&mut panels, id);
        if removed {
            self.save(&panels)?;
        }
        Ok(removed)
    }

    fn ping(&self) -> bool {
        match fs::metadata(&self.path) {
            Ok(metadata) => metadata.is_file() && !metadata.permissions().readonly(),
            Err(_) => self
                .path
                .parent()
                .map(|parent| if parent.as_os_str().is_empty() { Path::new(".") } else { parent })
                .is_some_and(|parent| parent.is_dir()),
        }
    }
}

/// Parse a JSON array of panels, as exported by the browser planner.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON, or [`Error::InvalidSpec`] for the
/// first panel that fails validation.
pub fn from_json(json: &str) -> Result<Vec<PanelSpec>> {
    let panels: Vec<PanelSpec> = serde_json::from_str(json)?;
    for spec in &panels {
        spec.validate()?;
    }
    Ok(panels)
}

/// Pretty-printed JSON array of `panels`.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn to_json(panels: &[PanelSpec]) -> Result<String> {
    Ok(serde_json::to_string_pretty(panels)?)
}

fn upsert_into(panels: &mut Vec<PanelSpec>, mut spec: PanelSpec) -> Result<PanelSpec> {
    spec.validate()?;
    if spec.id.is_empty() {
        spec.id = unused_id(panels, &spec);
    }
    match panels.iter_mut().find(|stored| stored.id == spec.id) {
        Some(stored) => *stored = spec.clone(),
        None => panels.push(spec.clone()),
    }
    Ok(spec)
}

fn remove_from(panels: &mut Vec<PanelSpec>, id: &str) -> bool {
    let before = panels.len();
    panels.retain(|spec| spec.id != id);
    panels.len() != before
}

// "ROE" + "Black Pearl BP2V2" -> "roe-black-pearl-bp2v2", then "-2", "-3", ... if taken.
fn unused_id(panels: &[PanelSpec], spec: &PanelSpec) -> String {
    let slug = format!("{} {}", spec.manufacturer, spec.name)
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    let base = if slug.is_empty() { "panel".to_owned() } else { slug };
    let taken = |candidate: &str| panels.iter().any(|stored| stored.id == candidate);
    if !taken(&base) {
        return base;
    }
    let mut suffix = 2_u64;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn encode<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize,
{
    let payload = postcard::to_allocvec(value).map_err(|err| {
        error!("Catalog: Serialization failed: {}", err);
        Error::CatalogCorrupted
    })?;
    if payload.len() > MAX_PAYLOAD_SIZE {
        error!(
            "Catalog: Payload of {} bytes exceeds {} bytes",
            payload.len(),
            MAX_PAYLOAD_SIZE
        );
        return Err(Error::CatalogTooLarge { max: MAX_PAYLOAD_SIZE });
    }

    let mut buffer = Vec::with_capacity(HEADER_SIZE + payload.len() + CRC_SIZE);
    buffer.extend_from_slice(&MAGIC.to_le_bytes());
    buffer.extend_from_slice(&compute_type_hash::<T>().to_le_bytes());
    buffer.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buffer.extend_from_slice(&payload);
    let crc = compute_crc(&buffer);
    buffer.extend_from_slice(&crc.to_le_bytes());
    Ok(buffer)
}

fn decode<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if read_u32(bytes, 0) != Some(MAGIC) {
        error!("Catalog: No catalog header found");
        return Err(Error::CatalogCorrupted);
    }

    let stored_type_hash = read_u32(bytes, 4).ok_or(Error::CatalogCorrupted)?;
    let expected_type_hash = compute_type_hash::<T>();
    if stored_type_hash != expected_type_hash {
        error!(
            "Catalog: Type mismatch (expected hash {}, found {})",
            expected_type_hash, stored_type_hash
        );
        return Err(Error::CatalogCorrupted);
    }

    let payload_len = read_u32(bytes, 8).ok_or(Error::CatalogCorrupted)? as usize;
    let crc_offset = HEADER_SIZE + payload_len;
    if payload_len > MAX_PAYLOAD_SIZE || bytes.len() != crc_offset + CRC_SIZE {
        error!(
            "Catalog: Invalid payload length {} in {} byte file",
            payload_len,
            bytes.len()
        );
        return Err(Error::CatalogCorrupted);
    }

    let stored_crc = read_u32(bytes, crc_offset).ok_or(Error::CatalogCorrupted)?;
    let computed_crc = compute_crc(&bytes[..crc_offset]);
    if stored_crc != computed_crc {
        error!(
            "Catalog: CRC mismatch (expected {}, found {})",
            computed_crc, stored_crc
        );
        return Err(Error::CatalogCorrupted);
    }

    postcard::from_bytes(&bytes[HEADER_SIZE..crc_offset]).map_err(|err| {
        error!("Catalog: Deserialization failed: {}", err);
        Error::CatalogCorrupted
    })
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let field = bytes.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes(field.try_into().ok()?))
}

/// Compute FNV-1a hash of the type name for type safety.
fn compute_type_hash<T>() -> u32 {
    const FNV_PRIME: u32 = 16_777_619;
    const FNV_OFFSET: u32 = 2_166_136_261;

    core::any::type_name::<T>()
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME))
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_truncated_file() {
        let mut bytes = encode(&default_panels()).expect("encodes");
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(decode::<Vec<PanelSpec>>(&bytes), Err(Error::CatalogCorrupted)));
    }

    #[test]
    fn decode_rejects_short_garbage() {
        assert!(matches!(decode::<Vec<PanelSpec>>(&[1, 2]), Err(Error::CatalogCorrupted)));
    }

    #[test]
    fn decode_rejects_another_stored_type() {
        let bytes = encode(&vec![1_u32, 2, 3]).expect("encodes");
        assert!(matches!(decode::<Vec<PanelSpec>>(&bytes), Err(Error::CatalogCorrupted)));
        assert_eq!(decode::<Vec<u32>>(&bytes).expect("decodes"), vec![1, 2, 3]);
    }

    #[test]
    fn generated_ids_avoid_collisions() {
        let mut panels = Vec::new();
        let spec = PanelSpec::new("", "PL2.5 Pro", "Absen", 500.0, 500.0, 2.5, 6.2, 160.0);
        let first = upsert_into(&mut panels, spec.clone()).expect("valid");
        let second = upsert_into(&mut panels, spec).expect("valid");
        assert_eq!(first.id, "absen-pl2-5-pro");
        assert_eq!(second.id, "absen-pl2-5-pro-2");
        assert_eq!(panels.len(), 2);
    }
}
