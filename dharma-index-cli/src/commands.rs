//! Build command and console reporting

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use dharma_index_core::writer::format_kib;
use dharma_index_core::{BuildEvent, BuildReport, IndexError, SiteConfig, build_site};

/// Exit code for missing or unparseable input files.
const INPUT_ERROR_EXIT: u8 = 1;

/// Hints printed after a catalog parse error
const MALFORMED_INPUT_HINTS: &[&str] = &[
    "A missing comma between entries",
    "A missing quotation mark",
    "A stray character",
];

/// Build the page and report progress on the console.
///
/// Site directory precedence: `site_dir` argument, then
/// `DHARMA_INDEX_SITE_DIR`, then the directory of the running executable.
///
/// # Errors
/// - Executable location cannot be determined
/// - Any build failure other than missing or malformed input files
pub fn run_build(site_dir: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let mut config = SiteConfig::from_env(executable_dir()?);
    if let Some(dir) = site_dir {
        config.site_dir = dir;
    }
    tracing::debug!(site_dir = %config.site_dir.display(), "Resolved site directory");

    println!("Building Doug's Dharma Video Index...");
    println!();

    let result = build_site(&config, |event| {
        if let Some(line) = event_line(event) {
            println!("{line}");
        }
    });

    match result {
        Ok(report) => {
            print_summary(&report);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) if error.is_user_error() => {
            for line in user_error_lines(&error, &config) {
                eprintln!("{line}");
            }
            Ok(ExitCode::from(INPUT_ERROR_EXIT))
        }
        Err(error) => Err(error).context("Build failed"),
    }
}

/// Directory containing the running executable
fn executable_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("Cannot locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable path has no parent directory")
}

/// Progress line for a build event
fn event_line(event: &BuildEvent) -> Option<String> {
    match event {
        BuildEvent::RecordsLoaded { path, count } => Some(format!(
            "  ✓ Loaded {count} videos from {}",
            display_name(path)
        )),
        BuildEvent::DataCompacted { bytes } => Some(format!(
            "  ✓ Compacted data ({})",
            format_kib(*bytes as u64)
        )),
        BuildEvent::TemplateLoaded { path } => {
            Some(format!("  ✓ Loaded {}", display_name(path)))
        }
        BuildEvent::DateRangeMissing => None,
        BuildEvent::OutputWritten { path, bytes } => Some(format!(
            "  ✓ Created {} ({})",
            display_name(path),
            format_kib(*bytes)
        )),
    }
}

/// Print final statistics and next steps
fn print_summary(report: &BuildReport) {
    let stats = &report.stats;
    let output = display_name(&report.output_path);

    println!();
    println!(
        "  Stats: {} videos, {} topics, {} suttas",
        stats.video_count, stats.topic_count, stats.sutta_count
    );
    match &stats.date_range {
        Some(range) => println!("  Date range: {range}"),
        None => println!("  Date range: unknown (no dated videos)"),
    }
    println!();
    println!("Done! You can now:");
    println!("  - Open {output} in your browser to preview");
    println!("  - Push to GitHub to publish (see the guide)");
}

/// Friendly guidance for missing or malformed input files
fn user_error_lines(error: &IndexError, config: &SiteConfig) -> Vec<String> {
    match error {
        IndexError::InputNotFound { path } => {
            let mut lines = vec![format!("  ✗ ERROR: {} not found!", display_name(path))];
            if *path == config.data_path() {
                lines.push(format!(
                    "    Make sure this file is in the site folder: {}",
                    config.site_dir.display()
                ));
            }
            lines
        }
        IndexError::MalformedInput {
            path,
            line,
            column,
            message,
        } => {
            let mut lines = vec![
                format!("  ✗ ERROR: {} has a formatting error!", display_name(path)),
                format!("    {message} (line {line}, column {column})"),
                String::new(),
                "  Common causes:".to_string(),
            ];
            lines.extend(MALFORMED_INPUT_HINTS.iter().map(|hint| format!("    - {hint}")));
            lines.push(String::new());
            lines.push("  The error is near the line number shown above.".to_string());
            lines
        }
        other => vec![format!("  ✗ ERROR: {other}")],
    }
}

/// File name of `path`, or the whole path when it has none
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines_use_file_names() {
        let line = event_line(&BuildEvent::RecordsLoaded {
            path: PathBuf::from("/srv/site/dougs_dharma_index.json"),
            count: 42,
        });
        assert_eq!(
            line.as_deref(),
            Some("  ✓ Loaded 42 videos from dougs_dharma_index.json")
        );

        let line = event_line(&BuildEvent::OutputWritten {
            path: PathBuf::from("/srv/site/index.html"),
            bytes: 10_240,
        });
        assert_eq!(line.as_deref(), Some("  ✓ Created index.html (10 KB)"));
    }

    #[test]
    fn test_date_range_missing_has_no_progress_line() {
        assert_eq!(event_line(&BuildEvent::DateRangeMissing), None);
    }

    #[test]
    fn test_missing_data_file_guidance_names_site_dir() {
        let config = SiteConfig::for_site_dir("/srv/site");
        let error = IndexError::InputNotFound {
            path: config.data_path(),
        };

        let lines = user_error_lines(&error, &config);

        assert_eq!(lines[0], "  ✗ ERROR: dougs_dharma_index.json not found!");
        assert!(lines[1].contains("/srv/site"));
    }

    #[test]
    fn test_missing_template_guidance_is_single_line() {
        let config = SiteConfig::for_site_dir("/srv/site");
        let error = IndexError::InputNotFound {
            path: config.template_path(),
        };

        let lines = user_error_lines(&error, &config);

        assert_eq!(lines, vec!["  ✗ ERROR: template.html not found!"]);
    }

    #[test]
    fn test_malformed_input_guidance_lists_hints() {
        let config = SiteConfig::for_site_dir("/srv/site");
        let error = IndexError::MalformedInput {
            path: config.data_path(),
            line: 12,
            column: 3,
            message: "trailing comma".to_string(),
        };

        let lines = user_error_lines(&error, &config);

        assert_eq!(
            lines[0],
            "  ✗ ERROR: dougs_dharma_index.json has a formatting error!"
        );
        assert_eq!(lines[1], "    trailing comma (line 12, column 3)");
        assert!(lines.contains(&"    - A missing comma between entries".to_string()));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("  The error is near the line number shown above.")
        );
    }
}
