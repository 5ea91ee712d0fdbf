use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::model::Record;

/// Removes the files directly inside `dir` and makes sure it exists.
///
/// Subdirectories are left alone. Files that cannot be removed are logged and
/// left behind; failing to create the directory is an error.
pub fn reset_output_dir(dir: &Path) -> Result<()> {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                debug!(path = %path.display(), "keeping subdirectory of the JSON directory");
                continue;
            }
            if let Err(error) = fs::remove_file(&path) {
                warn!(path = %path.display(), "failed to remove stale output: {error}");
            }
        }
    }

    fs::create_dir_all(dir)?;
    Ok(())
}

/// Fails when `dir` is, or contains, one of the `protected` directories.
/// Directories that do not exist yet cannot overlap and are ignored.
pub fn ensure_disjoint(dir: &Path, protected: &[&Path]) -> Result<()> {
    let Ok(dir) = dir.canonicalize() else {
        return Ok(());
    };
    for other in protected {
        let Ok(other) = other.canonicalize() else {
            continue;
        };
        if other.starts_with(&dir) {
            return Err(ToolError::UnsafeOutputDir { dir, other });
        }
    }
    Ok(())
}

/// Path of the JSON file holding a sheet's records.
pub fn json_path(dir: &Path, sheet: &str) -> PathBuf {
    dir.join(format!("{sheet}.json"))
}

/// Writes the records of `sheet` as a pretty-printed JSON array into `dir`
/// and returns the file path.
pub fn write_records(dir: &Path, sheet: &str, records: &[Record]) -> Result<PathBuf> {
    let path = json_path(dir, sheet);
    let mut json_string = serde_json::to_string_pretty(records)?;
    json_string.push('\n');
    fs::write(&path, json_string)?;
    Ok(path)
}
