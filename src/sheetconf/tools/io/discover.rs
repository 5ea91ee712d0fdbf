use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::sheetconf::tools::error::{Result, ToolError};

/// File extensions recognised as spreadsheets, compared case-insensitively.
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Recursively lists the spreadsheets under `dir`, sorted by file name within
/// each directory. Office lock files (`~$Book.xlsx`) are skipped.
pub fn find_spreadsheets(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ToolError::MissingInput(dir.to_path_buf()));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_spreadsheet(entry.path()) {
            found.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "ignoring non-spreadsheet file");
        }
    }

    Ok(found)
}

pub fn is_spreadsheet(path: &Path) -> bool {
    let lock_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"));
    let known_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
    known_extension && !lock_file
}
