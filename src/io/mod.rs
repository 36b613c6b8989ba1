//! Reading the serialized dataset artifacts

mod artifacts;
mod index_file;
mod store;

use crate::{PlanetoidError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub use artifacts::RawArtifacts;
pub use index_file::parse_index_file;
pub use store::{ArtifactName, ArtifactStore, DirectoryStore, MemoryStore};

/// Read a whole file, mapping a missing file to `NotFound`
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PlanetoidError::NotFound(path.display().to_string()),
        _ => PlanetoidError::IoError(e),
    })?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Save object to JSON file
pub fn save_json<T: Serialize>(obj: &T, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(obj)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Load object from JSON file
pub fn load_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let contents = read_file(path.as_ref())?;
    let obj = serde_json::from_slice(&contents)?;
    Ok(obj)
}
