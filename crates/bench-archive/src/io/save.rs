//! Archive saving operations.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use bench_model::BenchValue;

use crate::encode::encode;
use crate::error::{ArchiveError, Result};

/// Save a value to an archive file.
///
/// The value is encoded in full before the filesystem is touched, so
/// a rejected value (one containing a benchmark definition) leaves no
/// file behind. Uses atomic write (temp file + rename) so a crash
/// mid-write cannot leave a truncated archive at the target path.
pub fn save(path: &Path, value: &BenchValue) -> Result<()> {
    let tree = encode(value)?;

    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ArchiveError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(&temp_path).map_err(|e| ArchiveError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &tree).map_err(|e| ArchiveError::Write { source: e })?;
    writer.flush().map_err(|e| ArchiveError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    let file = writer.into_inner().map_err(|e| ArchiveError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e.into_error(),
    })?;
    file.sync_all().map_err(|e| ArchiveError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ArchiveError::Io {
        operation: "rename",
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Saved benchmark archive to {}", path.display());
    Ok(())
}

/// Encode a value and write it as archive text to an arbitrary writer.
pub fn write_archive<W: Write>(mut writer: W, value: &BenchValue) -> Result<()> {
    let tree = encode(value)?;
    serde_json::to_writer(&mut writer, &tree).map_err(|e| ArchiveError::Write { source: e })
}
