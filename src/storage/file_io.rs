//! JSON file I/O with atomic writes
//!
//! Every repository persists through these two functions. Errors carry the
//! file path so a corrupt or unwritable data file is easy to find.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::DrainerError;

fn io_failure(action: &str, path: &Path, e: impl Display) -> DrainerError {
    DrainerError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Load `path`, or `T::default()` when the file has not been written yet
pub fn read_json<T, P>(path: P) -> Result<T, DrainerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(io_failure("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| io_failure("parse", path, e))
}

/// Replace `path` with `data` through a synced sibling temp file
///
/// On error the previous contents are still in place.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), DrainerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_failure("create directory", parent, e))?;
    }

    // Sibling of the target so the rename never crosses filesystems
    let staged = path.with_extension("json.tmp");
    let mut writer = BufWriter::new(
        File::create(&staged).map_err(|e| io_failure("create", &staged, e))?,
    );

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| io_failure("serialize into", &staged, e))?;
    writer.flush().map_err(|e| io_failure("flush", &staged, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| io_failure("sync", &staged, e))?;

    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        io_failure("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Snapshot {
        title: String,
        cents: i64,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Snapshot = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Snapshot::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("expenses.json");

        let data = Snapshot {
            title: "Dinner".to_string(),
            cents: 12050,
        };
        write_json_atomic(&path, &data).unwrap();

        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(data, loaded);
        assert!(!temp_dir.path().join("nested").join("expenses.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_target_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let original = Snapshot {
            title: "Original".to_string(),
            cents: 1,
        };
        write_json_atomic(&path, &original).unwrap();

        // A directory squatting on the temp path makes the write fail
        fs::create_dir(temp_dir.path().join("expenses.json.tmp")).unwrap();
        let replacement = Snapshot {
            title: "Replacement".to_string(),
            cents: 2,
        };
        assert!(write_json_atomic(&path, &replacement).is_err());

        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Snapshot, _> = read_json(&path);
        match result {
            Err(DrainerError::Storage(msg)) => assert!(msg.contains("bad.json")),
            other => panic!("expected storage error, got {:?}", other),
        }
    }
}
