//! Post model

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Post title, as written in the front-matter
    pub title: Option<String>,

    /// Raw date string, as written in the front-matter
    pub date: Option<String>,

    /// Parsed `date`, used for ordering only
    pub parsed_date: Option<NaiveDateTime>,

    /// Source file stem; the post is written to `posts/<filename>.html`
    pub filename: String,

    /// Rendered HTML content
    pub content: String,

    /// Full source file path
    pub source: PathBuf,

    /// Remaining front-matter fields, in source order
    pub extra: IndexMap<String, String>,
}

impl Post {
    /// Output path relative to the output directory
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from("posts").join(format!("{}.html", self.filename))
    }

    /// Absolute URL path used by the index
    pub fn url(&self) -> String {
        format!("/posts/{}.html", self.filename)
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn date_or_empty(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }
}

/// Newest first; undated posts last; ties by filename
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (&a.parsed_date, &b.parsed_date) {
        (Some(da), Some(db)) => db.cmp(da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.filename.cmp(&b.filename))
}
