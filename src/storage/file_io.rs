//! File I/O utilities with atomic writes
//!
//! Reads never fail: a missing, empty or unparseable data file reads as
//! "no data". Writes go to a temp file that is renamed over the target.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TrackerError;

/// Read a JSON document, returning `None` when there is nothing usable
///
/// Missing files and whitespace-only files are silent; unreadable or
/// malformed files are reported with a warning.
pub fn read_json_value<P: AsRef<Path>>(path: P) -> Option<Value> {
    let path = path.as_ref();

    if !path.exists() {
        debug!("{} does not exist, treating as empty", path.display());
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    if contents.trim().is_empty() {
        debug!("{} is empty, treating as empty", path.display());
        return None;
    }

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse {}: {}; treating as empty", path.display(), e);
            None
        }
    }
}

/// Read JSON from a file, returning the default value if there is no usable data
pub fn read_json_or_default<T, P>(path: P) -> T
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let Some(value) = read_json_value(path) else {
        return T::default();
    };

    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Unexpected content in {}: {}; treating as empty", path.display(), e);
        T::default()
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely replaced or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Check if a JSON file exists and is valid
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.exists() && read_json_value(path).is_some()
}
