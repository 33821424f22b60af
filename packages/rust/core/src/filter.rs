//! Visibility filtering for categories and posts.

use std::collections::HashMap;

use tracing::info;

use forumindex_shared::{Category, Post};

/// Public category id → category name.
pub type CategoryMap = HashMap<i64, String>;

/// Build the id → name mapping of categories that are readable by everyone.
pub fn visible_categories(categories: Option<&[Category]>) -> CategoryMap {
    categories
        .unwrap_or_default()
        .iter()
        .filter(|category| !category.read_restricted)
        .map(|category| (category.id, category.name.clone()))
        .collect()
}

/// Why a post is left out of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Hidden,
    Deleted,
    NonPublicCategory,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Hidden => "hidden",
            Self::Deleted => "deleted",
            Self::NonPublicCategory => "category is not public",
        };
        f.write_str(reason)
    }
}

/// First reason the post must be skipped, if any.
pub fn skip_reason(post: &Post, categories: &CategoryMap) -> Option<SkipReason> {
    if post.hidden {
        Some(SkipReason::Hidden)
    } else if post.is_deleted() {
        Some(SkipReason::Deleted)
    } else if !categories.contains_key(&post.category_id) {
        Some(SkipReason::NonPublicCategory)
    } else {
        None
    }
}

/// Admit a post for indexing, returning its category name.
///
/// Skipped posts are logged and yield `None`.
pub fn admit<'c>(post: &Post, categories: &'c CategoryMap) -> Option<&'c str> {
    if let Some(reason) = skip_reason(post, categories) {
        info!(post_id = post.id, path = %post.topic_path(), %reason, "skipping post");
        return None;
    }
    categories.get(&post.category_id).map(String::as_str)
}
