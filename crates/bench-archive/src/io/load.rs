//! Archive loading operations.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bench_model::BenchValue;
use serde_json::Value;

use crate::decode::decode;
use crate::error::{ArchiveError, Result};

/// Load a value from an archive file.
pub fn load(path: &Path) -> Result<BenchValue> {
    let file = File::open(path).map_err(|e| ArchiveError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source: e,
    })?;

    let value = read_archive(BufReader::new(file))?;
    tracing::info!("Loaded benchmark archive from {}", path.display());
    Ok(value)
}

/// Read archive text from an arbitrary reader and decode it.
pub fn read_archive<R: Read>(reader: R) -> Result<BenchValue> {
    let tree: Value =
        serde_json::from_reader(reader).map_err(|e| ArchiveError::Parse { source: e })?;
    decode(&tree)
}
