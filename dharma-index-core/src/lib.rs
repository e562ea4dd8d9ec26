//! Dharma Index Core - Static page generation for the Dharma video index
//!
//! This crate provides the building blocks for turning the video catalog
//! into a single self-contained page: catalog loading, record compaction,
//! summary statistics, placeholder substitution and output writing.

pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod stats;
pub mod template;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
pub mod tracing_setup;
pub mod writer;

use std::path::PathBuf;

// Re-export main types for convenient access
pub use catalog::{CompactRecord, VideoRecord, compact_catalog, load_catalog, to_compact_json};
pub use config::SiteConfig;
pub use pipeline::{BuildEvent, BuildReport, build_site};
pub use stats::{CatalogStats, DateRange};
pub use template::{Placeholder, Substitutions, load_template, render};
pub use writer::write_output;

/// Errors that can abort a site build.
///
/// Only `InputNotFound` and `MalformedInput` are expected user errors; the
/// remaining variants indicate broken data or environment problems.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Data or template file does not exist
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Data file is not valid JSON or not an array of records
    #[error("Malformed input in {} at line {line}, column {column}: {message}", path.display())]
    MalformedInput {
        /// Path of the offending file
        path: PathBuf,
        /// 1-based line of the parse failure
        line: usize,
        /// 1-based column of the parse failure
        column: usize,
        /// Parser message without position suffix
        message: String,
    },

    /// Required record field is absent or null
    #[error("Record {index} is missing required field '{field}'")]
    MissingField {
        /// Position of the record in the catalog
        index: usize,
        /// Field path, e.g. `sutta_refs[2].sutta_id`
        field: String,
    },

    /// Record field present with an unexpected JSON type
    #[error("Record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Date value not in `YYYY-MM-DD` form
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IndexError {
    /// Checks if this error is caused by missing or unparseable input files.
    ///
    /// These are the failures a user fixes by hand before re-running.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            IndexError::InputNotFound { .. } | IndexError::MalformedInput { .. }
        )
    }

    /// Maps a read failure to `InputNotFound` when the file is absent.
    pub(crate) fn from_read_error(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            IndexError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IndexError::Io(error)
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        let not_found = IndexError::InputNotFound {
            path: PathBuf::from("template.html"),
        };
        let malformed = IndexError::MalformedInput {
            path: PathBuf::from("data.json"),
            line: 3,
            column: 1,
            message: "trailing comma".to_string(),
        };
        let missing = IndexError::MissingField {
            index: 0,
            field: "title".to_string(),
        };

        assert!(not_found.is_user_error());
        assert!(malformed.is_user_error());
        assert!(!missing.is_user_error());
        assert!(!IndexError::InvalidDate { value: "soon".to_string() }.is_user_error());
    }

    #[test]
    fn test_read_error_not_found_maps_to_input_not_found() {
        let error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let mapped = IndexError::from_read_error(std::path::Path::new("a.json"), error);
        assert!(matches!(mapped, IndexError::InputNotFound { .. }));

        let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let mapped = IndexError::from_read_error(std::path::Path::new("a.json"), error);
        assert!(matches!(mapped, IndexError::Io(_)));
    }

    #[test]
    fn test_missing_field_message_names_field_and_index() {
        let error = IndexError::MissingField {
            index: 4,
            field: "youtube_url".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Record 4 is missing required field 'youtube_url'"
        );
    }
}
