//! Test fixtures for site builds.
//!
//! Provides temporary site directories and a small sample catalog for
//! consistent testing across modules and integration tests.

use std::path::{Path, PathBuf};

/// Template referencing every placeholder once.
pub const SAMPLE_TEMPLATE: &str = "<html><body>\
<h1>PLACEHOLDER_VIDEO_COUNT videos</h1>\
<p>PLACEHOLDER_TOPIC_COUNT topics, PLACEHOLDER_SUTTA_COUNT suttas</p>\
<p>PLACEHOLDER_DATE_RANGE</p>\
<script>const DATA = PLACEHOLDER_DATA;</script>\
</body></html>";

/// Three-record catalog with overlapping topics and suttas.
pub const SAMPLE_CATALOG: &str = r#"[
  {
    "title": "The Four Noble Truths",
    "date": "2021-03-05",
    "youtube_url": "https://www.youtube.com/watch?v=aaa",
    "summary": "An overview of dukkha and its cessation.",
    "topics": ["four noble truths", "dukkha"],
    "sutta_refs": [
      {"sutta_id": "SN 56.11", "url": "https://suttacentral.net/sn56.11", "label": "Setting the Wheel in Motion"}
    ],
    "related_videos": [
      {"title": "The Eightfold Path", "url": "https://www.youtube.com/watch?v=bbb"}
    ]
  },
  {
    "title": "The Eightfold Path",
    "date": "2019-11-02",
    "youtube_url": "https://www.youtube.com/watch?v=bbb",
    "topics": ["eightfold path", "dukkha"],
    "sutta_refs": [
      {"sutta_id": "SN 56.11", "label": null},
      {"sutta_id": "MN 117"}
    ],
    "other_refs": [
      {"type": "book", "label": "What the Buddha Taught"}
    ]
  },
  {
    "title": "Metta Practice",
    "date": "2020-01-01",
    "youtube_url": "https://www.youtube.com/watch?v=ccc",
    "summary": "Loving-kindness meditation, with a note on Pāli terms.",
    "topics": ["metta", "metta"]
  }
]"#;

/// Creates an empty temporary site directory.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
/// This is acceptable in test fixtures where failures indicate environment issues.
pub fn create_site_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Writes `contents` to `dir/name` and returns the full path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Creates a site directory holding the sample catalog and template under
/// their default file names.
pub fn create_sample_site() -> tempfile::TempDir {
    let site = create_site_dir();
    write_file(site.path(), "dougs_dharma_index.json", SAMPLE_CATALOG);
    write_file(site.path(), "template.html", SAMPLE_TEMPLATE);
    site
}
