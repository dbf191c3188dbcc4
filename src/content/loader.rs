//! Content loader - loads posts from the posts directory

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::post::newest_first;
use super::{FrontMatter, MarkdownRenderer, Post};
use crate::error::{BuildError, Result};
use crate::Site;

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::from_config(&site.config.highlight);
        Self { site, renderer }
    }

    /// Load every Markdown file directly inside the posts directory,
    /// newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = &self.site.posts_dir;
        let metadata = fs::metadata(posts_dir).map_err(|source| BuildError::ReadDir {
            path: posts_dir.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(BuildError::ReadDir {
                path: posts_dir.clone(),
                source: io::Error::other("not a directory"),
            });
        }

        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BuildError::ReadDir {
                path: posts_dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let post = self.load_post(path)?;
            if let Some(first) = seen.insert(post.filename.clone(), path.to_path_buf()) {
                return Err(BuildError::DuplicatePost {
                    filename: post.filename,
                    first,
                    second: path.to_path_buf(),
                });
            }
            posts.push(post);
        }

        posts.sort_by(newest_first);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path).map_err(|source| BuildError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&raw);

        let parsed_date = fm.parse_date();
        self.check_required(path, &fm, parsed_date.is_some())?;

        let filename = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = self.renderer.render(body);

        let mut extra = fm.into_fields();
        let title = extra.shift_remove("title");
        let date = extra.shift_remove("date");

        Ok(Post {
            title,
            date,
            parsed_date,
            filename,
            content,
            source: path.to_path_buf(),
            extra,
        })
    }

    /// Warn about (or, in strict mode, reject) posts without a usable
    /// title and date
    fn check_required(&self, path: &Path, fm: &FrontMatter, date_parsed: bool) -> Result<()> {
        let strict = self.site.config.strict_front_matter;

        for field in ["title", "date"] {
            if fm.get(field).is_none() {
                if strict {
                    return Err(BuildError::MissingField {
                        file: path.to_path_buf(),
                        field,
                    });
                }
                tracing::warn!("Post {:?} has no `{}`", path, field);
            }
        }

        if let Some(date) = fm.date() {
            if !date_parsed {
                if strict {
                    return Err(BuildError::InvalidDate {
                        file: path.to_path_buf(),
                        date: date.to_string(),
                    });
                }
                tracing::warn!(
                    "Post {:?} has an unparseable date {:?}; it will be listed last",
                    path,
                    date
                );
            }
        }

        Ok(())
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
