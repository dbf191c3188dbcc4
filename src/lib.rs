//! mdpress: a small static blog generator
//!
//! Reads Markdown posts with front-matter from a posts directory and writes
//! an index page plus one page per post, using plain `{{placeholder}}`
//! templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::BuildError;
pub use generator::BuildReport;

/// Default configuration file name, looked up in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site: its configuration plus resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown sources
    pub posts_dir: PathBuf,
    /// layout.html, post.html, index.html
    pub templates_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// Stylesheet source directory
    pub styles_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config = Self::load_config(base_dir, None)?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Read the configuration: an explicit file, else `_config.yml` in
    /// `base_dir` if it exists, else defaults
    pub fn load_config(base_dir: &Path, explicit: Option<&Path>) -> Result<config::SiteConfig> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            };
            return config::SiteConfig::load(path);
        }

        let config_path = base_dir.join(CONFIG_FILE);
        if config_path.exists() {
            config::SiteConfig::load(&config_path)
        } else {
            Ok(config::SiteConfig::default())
        }
    }

    /// Create a site from a directory and an already-loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let templates_dir = base_dir.join(&config.templates_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let styles_dir = base_dir.join(&config.styles_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            templates_dir,
            output_dir,
            styles_dir,
        }
    }

    /// Build the static site
    pub fn build(&self) -> Result<BuildReport> {
        commands::build::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.posts_dir, dir.path().join("posts"));
        assert_eq!(site.templates_dir, dir.path().join("templates"));
        assert_eq!(site.output_dir, dir.path().join("dist"));
        assert_eq!(site.styles_dir, dir.path().join("styles"));
    }

    #[test]
    fn test_site_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "output_dir: public\n").unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.output_dir, dir.path().join("public"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Site::load_config(dir.path(), Some(Path::new("site.yml"))).is_err());
    }
}
