//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // Directory
    pub posts_dir: String,
    pub templates_dir: String,
    pub output_dir: String,
    pub styles_dir: String,

    // Stylesheet
    pub stylesheet: String,
    /// Public href substituted for `{{STYLES_PATH}}` in the layout
    pub styles_path: String,

    // Writing
    /// Fail the build instead of warning when `title` or `date` is missing or bad
    pub strict_front_matter: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),

            posts_dir: "posts".to_string(),
            templates_dir: "templates".to_string(),
            output_dir: "dist".to_string(),
            styles_dir: "styles".to_string(),

            stylesheet: "main.css".to_string(),
            styles_path: "/styles/main.css".to_string(),

            strict_front_matter: false,
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        for key in config.unknown_keys() {
            tracing::warn!("{:?}: unknown config key `{}` is ignored", path, key);
        }
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Top-level keys that no setting reads, sorted
    pub fn unknown_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.templates_dir, "templates");
        assert_eq!(config.output_dir, "dist");
        assert_eq!(config.styles_path, "/styles/main.css");
        assert!(!config.strict_front_matter);
        assert!(!config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes
output_dir: public
strict_front_matter: true
highlight:
  enable: true
analytics: abc123
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.output_dir, "public");
        assert_eq!(config.posts_dir, "posts");
        assert!(config.strict_front_matter);
        assert!(config.highlight.enable);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(
            config.extra.get("analytics").and_then(|v| v.as_str()),
            Some("abc123")
        );
    }

    #[test]
    fn test_load_reports_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Notes\ntheme: dark\nanalytics: abc123\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.unknown_keys(), vec!["analytics", "theme"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(dir.path().join("_config.yml")).is_err());
    }
}
