//! Core domain types: the forum source document and the search records built from it.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source document (forum export)
// ---------------------------------------------------------------------------

/// A forum category as exported by the source collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Restricted categories are never indexed.
    pub read_restricted: bool,
}

/// A forum post as exported by the source collector.
///
/// Only the fields the transform reads are modelled; everything else in the
/// export is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub category_id: i64,
    pub topic_id: i64,
    pub topic_title: String,
    pub topic_slug: String,
    pub topic_accepted_answer: bool,
    pub post_number: i64,
    pub hidden: bool,
    /// Deletion timestamp; absent and `null` both mean "not deleted".
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Rendered HTML body.
    pub cooked: String,
}

impl Post {
    /// Site-relative path of the post (`/t/<slug>/<topic_id>/<post_number>`).
    pub fn topic_path(&self) -> String {
        format!(
            "/t/{}/{}/{}",
            self.topic_slug, self.topic_id, self.post_number
        )
    }

    /// Whether the post carries a non-empty deletion timestamp.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// The JSON blob produced by the source collector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

// ---------------------------------------------------------------------------
// Search records (index payload)
// ---------------------------------------------------------------------------

/// Hierarchy level a record represents in the search schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Lvl0,
    Lvl1,
    Lvl2,
    Lvl3,
    Lvl4,
    Lvl5,
    Lvl6,
    Content,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lvl0 => "lvl0",
            Self::Lvl1 => "lvl1",
            Self::Lvl2 => "lvl2",
            Self::Lvl3 => "lvl3",
            Self::Lvl4 => "lvl4",
            Self::Lvl5 => "lvl5",
            Self::Lvl6 => "lvl6",
            Self::Content => "content",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breadcrumb of a record: forum / category / topic / header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub lvl0: String,
    pub lvl1: String,
    pub lvl2: String,
    /// Header text for header records, `null` otherwise.
    pub lvl3: Option<String>,
}

/// Ranking priors attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    /// Higher is more prominent.
    pub level: u32,
    /// Zero-based block index within the post.
    pub position: usize,
}

/// One record pushed to the search index.
///
/// `content` and `hierarchy.lvl3` serialize as explicit `null` rather than
/// being omitted; the ranking relies on the distinction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub content: Option<String>,
    pub content_camel: Option<String>,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub url: String,
    pub hierarchy: Hierarchy,
    pub hierarchy_camel: Vec<Hierarchy>,
    pub weight: Weight,
    #[serde(rename = "objectID")]
    pub object_id: String,
}
