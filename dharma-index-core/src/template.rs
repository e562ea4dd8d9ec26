//! Placeholder substitution for the page template.
//!
//! Substitution is literal and global: every occurrence of a token is
//! replaced, tokens are processed in [`Placeholder::ALL`] order, and
//! nothing is escaped.

use std::fs;
use std::path::Path;

use crate::stats::CatalogStats;
use crate::{IndexError, Result};

/// Named tokens recognized in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Data,
    VideoCount,
    TopicCount,
    SuttaCount,
    DateRange,
}

impl Placeholder {
    /// Replacement order.
    pub const ALL: [Placeholder; 5] = [
        Placeholder::Data,
        Placeholder::VideoCount,
        Placeholder::TopicCount,
        Placeholder::SuttaCount,
        Placeholder::DateRange,
    ];

    /// Literal text of the token as it appears in the template.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Data => "PLACEHOLDER_DATA",
            Placeholder::VideoCount => "PLACEHOLDER_VIDEO_COUNT",
            Placeholder::TopicCount => "PLACEHOLDER_TOPIC_COUNT",
            Placeholder::SuttaCount => "PLACEHOLDER_SUTTA_COUNT",
            Placeholder::DateRange => "PLACEHOLDER_DATE_RANGE",
        }
    }
}

/// Replacement values, one optional slot per placeholder.
///
/// A placeholder without a value is left verbatim in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    data: Option<String>,
    video_count: Option<String>,
    topic_count: Option<String>,
    sutta_count: Option<String>,
    date_range: Option<String>,
}

impl Substitutions {
    /// Builds the full substitution set for a page.
    pub fn for_page(compact_json: String, stats: &CatalogStats) -> Self {
        Self {
            data: Some(compact_json),
            video_count: Some(stats.video_count.to_string()),
            topic_count: Some(stats.topic_count.to_string()),
            sutta_count: Some(stats.sutta_count.to_string()),
            date_range: stats.date_range.map(|range| range.to_string()),
        }
    }

    /// Sets the value for `placeholder`.
    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        *self.slot_mut(placeholder) = Some(value.into());
        self
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        match placeholder {
            Placeholder::Data => self.data.as_deref(),
            Placeholder::VideoCount => self.video_count.as_deref(),
            Placeholder::TopicCount => self.topic_count.as_deref(),
            Placeholder::SuttaCount => self.sutta_count.as_deref(),
            Placeholder::DateRange => self.date_range.as_deref(),
        }
    }

    fn slot_mut(&mut self, placeholder: Placeholder) -> &mut Option<String> {
        match placeholder {
            Placeholder::Data => &mut self.data,
            Placeholder::VideoCount => &mut self.video_count,
            Placeholder::TopicCount => &mut self.topic_count,
            Placeholder::SuttaCount => &mut self.sutta_count,
            Placeholder::DateRange => &mut self.date_range,
        }
    }
}

/// Reads the template file.
///
/// # Errors
/// - `IndexError::InputNotFound` - Template file does not exist
/// - `IndexError::Io` - File exists but could not be read
pub fn load_template(path: &Path) -> Result<String> {
    let template = fs::read_to_string(path).map_err(|e| IndexError::from_read_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = template.len(), "Loaded template");
    Ok(template)
}

/// Replaces every placeholder that has a value.
///
/// Later tokens are searched in the output of earlier replacements, so a
/// token appearing inside the embedded data is replaced as well.
pub fn render(template: &str, substitutions: &Substitutions) -> String {
    let mut page = template.to_string();

    for placeholder in Placeholder::ALL {
        let Some(value) = substitutions.get(placeholder) else {
            tracing::debug!(token = placeholder.token(), "No value, token left in place");
            continue;
        };

        let occurrences = page.matches(placeholder.token()).count();
        if occurrences > 0 {
            page = page.replace(placeholder.token(), value);
        }
        tracing::trace!(token = placeholder.token(), occurrences, "Substituted token");
    }

    page
}
