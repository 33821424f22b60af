//! Shared types, error model, and configuration for forumindex.
//!
//! This crate is the foundation depended on by all other forumindex crates.
//! It provides:
//! - [`ForumIndexError`]: the unified error type
//! - Domain types ([`Post`], [`Category`], [`SearchRecord`], [`Hierarchy`])
//! - Configuration ([`AppConfig`], [`TransformConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_MAX_RECORD_BYTES, ForumConfig, RecordsConfig, TransformConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, normalize_base_url,
};
pub use error::{ForumIndexError, Result};
pub use types::{
    Category, Hierarchy, Post, RecordType, SearchRecord, SourceDocument, Weight,
};
