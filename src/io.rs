//! JSON files read and written by the command-line tools.

use crate::geometry::TextLayout;
use crate::types::FixationSequence;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn read_json_file<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {what} {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {what} {}: {e}", path.display()))
}

/// Load a JSON array of fixations.
pub fn load_fixations(path: &Path) -> Result<FixationSequence, String> {
    read_json_file(path, "fixations")
}

/// Load a JSON text layout.
pub fn load_layout(path: &Path) -> Result<TextLayout, String> {
    read_json_file(path, "layout")
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
