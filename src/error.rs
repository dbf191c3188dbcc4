//! Build errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to read directory {path:?}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template not found: {path:?}")]
    MissingTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Post {file:?} is missing required field `{field}`")]
    MissingField { file: PathBuf, field: &'static str },

    #[error("Post {file:?} has an unparseable date: {date}")]
    InvalidDate { file: PathBuf, date: String },

    #[error("Posts {first:?} and {second:?} both map to posts/{filename}.html")]
    DuplicatePost {
        filename: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path:?}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy stylesheet {from:?} -> {to:?}")]
    CopyStylesheet {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
