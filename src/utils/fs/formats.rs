//! Text and JSON file readers that keep the path in their errors.

use crate::core::{FileOperation, FileResultExt, SkinError};
use anyhow::Result;
use std::path::Path;

/// Reads a UTF-8 text file.
pub fn read_text_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path).with_file_context(FileOperation::Read, path, "reading text file")?)
}

/// Reads and deserializes a JSON file.
///
/// Parse failures are reported as [`SkinError::ConfigParseError`] naming the
/// file.
pub fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_text_file(path)?;
    serde_json::from_str(&content).map_err(|e| {
        SkinError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
