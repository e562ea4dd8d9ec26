//! End-to-end page build.
//!
//! Runs load, compact, aggregate, render and write in sequence. Any stage
//! error aborts the build before the output file is touched.

use std::path::PathBuf;

use crate::Result;
use crate::catalog::{compact_catalog, load_catalog, parse_records, to_compact_json};
use crate::config::SiteConfig;
use crate::stats::CatalogStats;
use crate::template::{Substitutions, load_template, render};
use crate::writer::write_output;

/// Progress notifications emitted between build stages.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    RecordsLoaded { path: PathBuf, count: usize },
    DataCompacted { bytes: usize },
    TemplateLoaded { path: PathBuf },
    /// No record has a date; the date range token stays in the page
    DateRangeMissing,
    OutputWritten { path: PathBuf, bytes: u64 },
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_path: PathBuf,
    pub output_bytes: u64,
    pub compact_bytes: usize,
    pub stats: CatalogStats,
}

/// Builds the page described by `config`.
///
/// `on_event` is called after each stage completes.
///
/// # Errors
/// - `IndexError::InputNotFound` - Catalog or template file missing
/// - `IndexError::MalformedInput` - Catalog is not a JSON array
/// - `IndexError::MissingField` / `IndexError::InvalidRecord` - Bad record
/// - `IndexError::InvalidDate` - Unparseable date range endpoint
/// - `IndexError::Io` - Output could not be written
pub fn build_site<F>(config: &SiteConfig, mut on_event: F) -> Result<BuildReport>
where
    F: FnMut(&BuildEvent),
{
    let data_path = config.data_path();
    let values = load_catalog(&data_path)?;
    on_event(&BuildEvent::RecordsLoaded {
        path: data_path,
        count: values.len(),
    });

    let records = parse_records(values)?;
    let compact_json = to_compact_json(&compact_catalog(&records))?;
    let compact_bytes = compact_json.len();
    on_event(&BuildEvent::DataCompacted {
        bytes: compact_bytes,
    });

    let stats = CatalogStats::collect(&records)?;
    tracing::debug!(
        videos = stats.video_count,
        topics = stats.topic_count,
        suttas = stats.sutta_count,
        "Collected catalog statistics"
    );

    let template_path = config.template_path();
    let template = load_template(&template_path)?;
    on_event(&BuildEvent::TemplateLoaded {
        path: template_path,
    });

    if stats.date_range.is_none() {
        tracing::warn!("No dated records, date range placeholder left unfilled");
        on_event(&BuildEvent::DateRangeMissing);
    }

    let page = render(&template, &Substitutions::for_page(compact_json, &stats));

    let output_path = config.output_path();
    let output_bytes = write_output(&output_path, &page)?;
    on_event(&BuildEvent::OutputWritten {
        path: output_path.clone(),
        bytes: output_bytes,
    });

    Ok(BuildReport {
        output_path,
        output_bytes,
        compact_bytes,
        stats,
    })
}
