//! Compact record form embedded in the generated page.
//!
//! Keys are shortened to keep the inline payload small. The page script
//! reads these exact keys, so renaming any of them is a breaking change.

use serde::Serialize;

use super::{OtherRef, RelatedVideo, SuttaRef, VideoRecord};
use crate::Result;

/// Abbreviated-key form of [`VideoRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactRecord {
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "d")]
    pub date: Option<String>,
    #[serde(rename = "u")]
    pub youtube_url: String,
    #[serde(rename = "s")]
    pub summary: Option<String>,
    #[serde(rename = "tp")]
    pub topics: Vec<String>,
    #[serde(rename = "sr")]
    pub sutta_refs: Vec<CompactSuttaRef>,
    #[serde(rename = "or")]
    pub other_refs: Vec<CompactOtherRef>,
    #[serde(rename = "rv")]
    pub related_videos: Vec<CompactRelatedVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactSuttaRef {
    pub id: String,
    pub url: Option<String>,
    #[serde(rename = "l")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactOtherRef {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactRelatedVideo {
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "u")]
    pub url: String,
}

impl From<&VideoRecord> for CompactRecord {
    fn from(record: &VideoRecord) -> Self {
        Self {
            title: record.title.clone(),
            date: record.date.clone(),
            youtube_url: record.youtube_url.clone(),
            summary: record.summary.clone(),
            topics: record.topics.clone(),
            sutta_refs: record.sutta_refs.iter().map(CompactSuttaRef::from).collect(),
            other_refs: record.other_refs.iter().map(CompactOtherRef::from).collect(),
            related_videos: record
                .related_videos
                .iter()
                .map(CompactRelatedVideo::from)
                .collect(),
        }
    }
}

impl From<&SuttaRef> for CompactSuttaRef {
    fn from(sutta: &SuttaRef) -> Self {
        Self {
            id: sutta.sutta_id.clone(),
            url: sutta.url.clone(),
            label: sutta.label.clone(),
        }
    }
}

impl From<&OtherRef> for CompactOtherRef {
    fn from(other: &OtherRef) -> Self {
        Self {
            kind: other.kind.clone(),
            label: other.label.clone(),
            url: other.url.clone(),
        }
    }
}

impl From<&RelatedVideo> for CompactRelatedVideo {
    fn from(related: &RelatedVideo) -> Self {
        Self {
            title: related.title.clone(),
            url: related.url.clone(),
        }
    }
}

/// Compacts every record, preserving catalog order.
pub fn compact_catalog(records: &[VideoRecord]) -> Vec<CompactRecord> {
    records.iter().map(CompactRecord::from).collect()
}

/// Serializes compact records without insignificant whitespace.
///
/// Non-ASCII characters are written verbatim rather than `\u` escaped.
///
/// # Errors
/// - `IndexError::Serialization` - Serializer failure
pub fn to_compact_json(records: &[CompactRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
