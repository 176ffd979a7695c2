//! Errors raised while reading a single content file

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one source file into a post.
///
/// These never escape the repository query methods: listings drop the
/// offending file and lookups report the post as missing.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {format} front-matter: {message}")]
    FrontMatter {
        format: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ContentError>;
