//! Generator module - writes the index, the post pages and the stylesheet

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content::Post;
use crate::error::{BuildError, Result};
use crate::templates::TemplateRenderer;
use crate::Site;

/// Output subdirectory for post pages
pub const POSTS_OUT_DIR: &str = "posts";
/// Output subdirectory for the stylesheet
pub const STYLES_OUT_DIR: &str = "styles";

/// What one build wrote
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Number of posts rendered
    pub posts: usize,
    /// Path of the index page
    pub index: PathBuf,
    /// Paths of the post pages, in index order
    pub pages: Vec<PathBuf>,
    /// Path of the copied stylesheet, if there was one to copy
    pub stylesheet: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator, reading the templates up front
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = TemplateRenderer::load(&site.templates_dir, &site.config.styles_path)?;
        Ok(Self { site, renderer })
    }

    /// Write the whole site for `posts`, which must already be in index order
    pub fn generate(&self, posts: &[Post]) -> Result<BuildReport> {
        let output_dir = &self.site.output_dir;
        create_dir_all(output_dir)?;
        create_dir_all(&output_dir.join(POSTS_OUT_DIR))?;

        let index = self.generate_index(posts)?;
        let pages = self.generate_post_pages(posts)?;
        let stylesheet = self.copy_stylesheet()?;

        Ok(BuildReport {
            posts: posts.len(),
            index,
            pages,
            stylesheet,
            elapsed: Duration::default(),
        })
    }

    /// Generate the index page
    fn generate_index(&self, posts: &[Post]) -> Result<PathBuf> {
        let html = self.renderer.render_index(posts);
        let output_path = self.site.output_dir.join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(output_path)
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[Post]) -> Result<Vec<PathBuf>> {
        let mut pages = Vec::with_capacity(posts.len());
        for post in posts {
            let html = self.renderer.render_post(post);
            let output_path = self.site.output_dir.join(post.output_path());
            write_file(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
            pages.push(output_path);
        }
        Ok(pages)
    }

    /// Copy the configured stylesheet into `<output>/styles/`, if it exists
    fn copy_stylesheet(&self) -> Result<Option<PathBuf>> {
        let stylesheet = &self.site.config.stylesheet;
        let source = self.site.styles_dir.join(stylesheet);
        if !source.is_file() {
            tracing::debug!("No stylesheet at {:?}, skipping", source);
            return Ok(None);
        }

        let dest_dir = self.site.output_dir.join(STYLES_OUT_DIR);
        create_dir_all(&dest_dir)?;
        let dest = dest_dir.join(stylesheet);
        fs::copy(&source, &dest).map_err(|e| BuildError::CopyStylesheet {
            from: source.clone(),
            to: dest.clone(),
            source: e,
        })?;
        tracing::debug!("Copied: {:?} -> {:?}", source, dest);

        Ok(Some(dest))
    }
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| BuildError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| BuildError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
