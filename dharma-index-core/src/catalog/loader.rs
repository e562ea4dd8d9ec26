//! Catalog file loading.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{IndexError, Result};

/// Reads the catalog file and parses it as a JSON array.
///
/// Elements are returned as raw values; record validation happens when
/// they are decoded into [`super::VideoRecord`]s.
///
/// # Errors
/// - `IndexError::InputNotFound` - Catalog file does not exist
/// - `IndexError::MalformedInput` - Content is not a JSON array
/// - `IndexError::Io` - File exists but could not be read
pub fn load_catalog(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|e| IndexError::from_read_error(path, e))?;

    let values: Vec<Value> =
        serde_json::from_str(&text).map_err(|e| malformed_input(path, &e))?;

    tracing::debug!(
        path = %path.display(),
        records = values.len(),
        bytes = text.len(),
        "Loaded catalog"
    );

    Ok(values)
}

/// Converts a parser error into `MalformedInput`, splitting off the position.
fn malformed_input(path: &Path, error: &serde_json::Error) -> IndexError {
    let full = error.to_string();
    let position = format!(" at line {} column {}", error.line(), error.column());
    let message = full.strip_suffix(&position).unwrap_or(&full).to_string();

    IndexError::MalformedInput {
        path: path.to_path_buf(),
        line: error.line(),
        column: error.column(),
        message,
    }
}
