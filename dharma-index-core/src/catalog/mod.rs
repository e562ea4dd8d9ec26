//! Video catalog records.
//!
//! Records arrive as raw JSON objects from the loader. Required fields are
//! checked on the raw value first so a missing field is reported by name
//! and record position, then the value is decoded into typed records.

pub mod compact;
pub mod loader;

pub use compact::{
    CompactOtherRef, CompactRecord, CompactRelatedVideo, CompactSuttaRef, compact_catalog,
    to_compact_json,
};
pub use loader::load_catalog;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{IndexError, Result};

/// Top-level fields every record must carry.
const REQUIRED_RECORD_FIELDS: &[&str] = &["title", "youtube_url"];
/// Fields every entry of `sutta_refs` must carry.
const REQUIRED_SUTTA_FIELDS: &[&str] = &["sutta_id"];
/// Fields every entry of `related_videos` must carry.
const REQUIRED_RELATED_FIELDS: &[&str] = &["title", "url"];

/// Metadata for one video in the catalog.
///
/// Optional text fields are `Some("")` when absent and `None` when the
/// catalog sets them to `null`, so an explicit `null` reaches the page data
/// unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    /// ISO `YYYY-MM-DD` publication date
    #[serde(default = "empty_text")]
    pub date: Option<String>,
    pub youtube_url: String,
    #[serde(default = "empty_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sutta_refs: Vec<SuttaRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_refs: Vec<OtherRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_videos: Vec<RelatedVideo>,
}

/// Citation of a canonical sutta passage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuttaRef {
    pub sutta_id: String,
    #[serde(default = "empty_text")]
    pub url: Option<String>,
    /// Display label, `null` coalesced to empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

/// Reference to anything that is not a sutta (books, articles, talks).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OtherRef {
    #[serde(rename = "type", default = "empty_text")]
    pub kind: Option<String>,
    #[serde(default = "empty_text")]
    pub label: Option<String>,
    #[serde(default = "empty_text")]
    pub url: Option<String>,
}

/// Link to another video on the same subject.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatedVideo {
    pub title: String,
    pub url: String,
}

impl VideoRecord {
    /// Decodes the record at `index` from its raw JSON value.
    ///
    /// # Errors
    /// - `IndexError::MissingField` - Required field absent or null
    /// - `IndexError::InvalidRecord` - Value is not an object or a field has the wrong type
    pub fn from_value(index: usize, value: Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| IndexError::InvalidRecord {
            index,
            reason: format!("expected a JSON object, found {}", json_kind(&value)),
        })?;

        check_required(index, object)?;

        serde_json::from_value(value).map_err(|e| IndexError::InvalidRecord {
            index,
            reason: e.to_string(),
        })
    }

    /// Date with empty strings treated as absent.
    pub fn known_date(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| !date.is_empty())
    }
}

/// Decodes every raw value into a typed record, preserving order.
///
/// # Errors
/// - `IndexError::MissingField` - First record with an absent required field
/// - `IndexError::InvalidRecord` - First record that fails to decode
pub fn parse_records(values: Vec<Value>) -> Result<Vec<VideoRecord>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| VideoRecord::from_value(index, value))
        .collect()
}

/// Verifies presence of required fields, including those of nested entries.
fn check_required(index: usize, object: &Map<String, Value>) -> Result<()> {
    for field in REQUIRED_RECORD_FIELDS {
        if !is_present(object, field) {
            return Err(IndexError::MissingField {
                index,
                field: (*field).to_string(),
            });
        }
    }

    check_nested(index, object, "sutta_refs", REQUIRED_SUTTA_FIELDS)?;
    check_nested(index, object, "related_videos", REQUIRED_RELATED_FIELDS)
}

fn check_nested(
    index: usize,
    object: &Map<String, Value>,
    list: &str,
    required: &[&str],
) -> Result<()> {
    let Some(Value::Array(entries)) = object.get(list) else {
        return Ok(());
    };

    for (position, entry) in entries.iter().enumerate() {
        // Non-object entries are reported by the typed decode
        let Some(entry) = entry.as_object() else {
            continue;
        };
        for field in required {
            if !is_present(entry, field) {
                return Err(IndexError::MissingField {
                    index,
                    field: format!("{list}[{position}].{field}"),
                });
            }
        }
    }

    Ok(())
}

fn is_present(object: &Map<String, Value>, field: &str) -> bool {
    object.get(field).is_some_and(|value| !value.is_null())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Value of an absent optional text field.
fn empty_text() -> Option<String> {
    Some(String::new())
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
