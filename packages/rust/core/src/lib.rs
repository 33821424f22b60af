//! Record transformation for forumindex.
//!
//! This crate turns a forum export (posts + categories) into size-bounded
//! search records: category/post filtering, block classification, record
//! building with splitting, and output rendering.

pub mod filter;
pub mod hierarchy;
pub mod output;
pub mod pipeline;
pub mod records;

pub use filter::{CategoryMap, SkipReason, admit, skip_reason, visible_categories};
pub use hierarchy::{TagClass, classify_tag, header_and_content, weight_level};
pub use output::render_records;
pub use pipeline::{
    TransformOutput, parse_document, post_tags, post_url, transform, transform_post,
};
pub use records::{RecordSeed, build_records, object_id, serialized_len};
