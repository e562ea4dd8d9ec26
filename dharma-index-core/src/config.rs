//! Centralized configuration for the index build.
//!
//! File names and the site directory live here so the pipeline never
//! depends on the process working directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the site directory.
pub const ENV_SITE_DIR: &str = "DHARMA_INDEX_SITE_DIR";
/// Environment variable overriding the catalog file name.
pub const ENV_DATA_FILE: &str = "DHARMA_INDEX_DATA_FILE";
/// Environment variable overriding the template file name.
pub const ENV_TEMPLATE_FILE: &str = "DHARMA_INDEX_TEMPLATE_FILE";
/// Environment variable overriding the output file name.
pub const ENV_OUTPUT_FILE: &str = "DHARMA_INDEX_OUTPUT_FILE";

/// Locations of the build inputs and output.
///
/// File paths are relative to `site_dir` unless absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory every relative file path resolves against
    pub site_dir: PathBuf,
    /// JSON catalog of video records
    pub data_file: PathBuf,
    /// HTML template containing placeholder tokens
    pub template_file: PathBuf,
    /// Generated page, overwritten on every build
    pub output_file: PathBuf,
}

/// Catalog file name inside the site directory.
pub const DEFAULT_DATA_FILE: &str = "dougs_dharma_index.json";
/// Template file name inside the site directory.
pub const DEFAULT_TEMPLATE_FILE: &str = "template.html";
/// Output file name inside the site directory.
pub const DEFAULT_OUTPUT_FILE: &str = "index.html";

impl SiteConfig {
    /// Creates the default configuration rooted at `site_dir`.
    ///
    /// The only constructor; there is no working-directory default.
    pub fn for_site_dir(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: site_dir.into(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            template_file: PathBuf::from(DEFAULT_TEMPLATE_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }

    /// Creates configuration with environment variable overrides.
    pub fn from_env(site_dir: impl Into<PathBuf>) -> Self {
        Self::for_site_dir(site_dir).with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored so an exported-but-blank variable keeps
    /// the default.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = value(ENV_SITE_DIR) {
            self.site_dir = PathBuf::from(dir);
        }
        if let Some(file) = value(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(file);
        }
        if let Some(file) = value(ENV_TEMPLATE_FILE) {
            self.template_file = PathBuf::from(file);
        }
        if let Some(file) = value(ENV_OUTPUT_FILE) {
            self.output_file = PathBuf::from(file);
        }

        self
    }

    /// Joins `file` onto the site directory.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.site_dir.join(file)
    }

    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data_file)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_file)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_paths_resolve_against_site_dir() {
        let config = SiteConfig::for_site_dir("/srv/site");

        assert_eq!(
            config.data_path(),
            PathBuf::from("/srv/site/dougs_dharma_index.json")
        );
        assert_eq!(
            config.template_path(),
            PathBuf::from("/srv/site/template.html")
        );
        assert_eq!(config.output_path(), PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn test_site_dir_is_kept_verbatim() {
        let config = SiteConfig::for_site_dir("relative/site");

        assert_eq!(config.site_dir, PathBuf::from("relative/site"));
        assert_eq!(
            config.output_path(),
            PathBuf::from("relative/site/index.html")
        );
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_overrides_replace_file_names() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_DATA_FILE, "videos.json"),
            (ENV_OUTPUT_FILE, "public/index.html"),
            (ENV_TEMPLATE_FILE, "  "),
        ]);

        let config = SiteConfig::for_site_dir("/srv/site")
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_path(), PathBuf::from("/srv/site/videos.json"));
        assert_eq!(
            config.output_path(),
            PathBuf::from("/srv/site/public/index.html")
        );
        // Blank value keeps the default
        assert_eq!(config.template_file, PathBuf::from("template.html"));
    }

    #[test]
    fn test_site_dir_override() {
        let config = SiteConfig::for_site_dir("/srv/site").with_overrides(|key| {
            (key == ENV_SITE_DIR).then(|| "/tmp/other".to_string())
        });

        assert_eq!(config.site_dir, PathBuf::from("/tmp/other"));
    }

    #[test]
    fn test_absolute_file_ignores_site_dir() {
        let mut config = SiteConfig::for_site_dir("/srv/site");
        config.output_file = PathBuf::from("/var/www/index.html");

        assert_eq!(config.output_path(), PathBuf::from("/var/www/index.html"));
    }
}
