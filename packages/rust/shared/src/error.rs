//! Error types for forumindex.
//!
//! Library crates use [`ForumIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all forumindex operations.
#[derive(Debug, thiserror::Error)]
pub enum ForumIndexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The source document does not match the post/category schema.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON encoding of an output record failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A record cannot be brought under the size limit by splitting its content.
    #[error(
        "record for {url} (position {position}) is {size} bytes and cannot be split below the {limit} byte limit"
    )]
    RecordTooLarge {
        url: String,
        position: usize,
        size: usize,
        limit: usize,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ForumIndexError>;

impl ForumIndexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ForumIndexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ForumIndexError::config("base url is required");
        assert_eq!(err.to_string(), "config error: base url is required");

        let err = ForumIndexError::parse("missing field `category_id`");
        assert!(err.to_string().contains("category_id"));
    }

    #[test]
    fn record_too_large_mentions_limit() {
        let err = ForumIndexError::RecordTooLarge {
            url: "https://forum.example.com/t/a/1/1".into(),
            position: 3,
            size: 12_000,
            limit: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("position 3"));
        assert!(msg.contains("10000 byte limit"));
    }
}
