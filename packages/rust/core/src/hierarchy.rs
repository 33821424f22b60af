//! Tag → record type classification and level weights.
//!
//! Forum name is `lvl0`, category `lvl1`, topic title `lvl2`. In-post headers
//! (h1–h3) all map to `lvl3` so the hierarchy stays shallow; everything else
//! is body content.

use std::collections::HashMap;
use std::sync::LazyLock;

use forumindex_shared::RecordType;

static TYPE_FOR_TAG: LazyLock<HashMap<&'static str, RecordType>> = LazyLock::new(|| {
    HashMap::from([
        ("h1", RecordType::Lvl3),
        ("h2", RecordType::Lvl3),
        ("h3", RecordType::Lvl3),
        ("h4", RecordType::Content),
        ("h5", RecordType::Content),
        ("h6", RecordType::Content),
        ("p", RecordType::Content),
        ("div", RecordType::Content),
        ("ul", RecordType::Content),
        ("ol", RecordType::Content),
        ("li", RecordType::Content),
        ("blockquote", RecordType::Content),
        ("pre", RecordType::Content),
        ("code", RecordType::Content),
        ("details", RecordType::Content),
    ])
});

/// Quotes of other posts and bare images are never indexed.
const EXCLUDED_TAGS: &[&str] = &["aside", "img"];

static WEIGHT_FOR_TYPE: LazyLock<HashMap<RecordType, u32>> = LazyLock::new(|| {
    HashMap::from([
        (RecordType::Lvl0, 100),
        (RecordType::Lvl1, 90),
        (RecordType::Lvl2, 80),
        (RecordType::Lvl3, 70),
        (RecordType::Lvl4, 60),
        (RecordType::Lvl5, 50),
        (RecordType::Lvl6, 40),
        (RecordType::Content, 0),
    ])
});

/// How a top-level block's tag is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Known tag with its record type.
    Indexed(RecordType),
    /// Never indexed.
    Excluded,
    /// Not in the table; indexed as content.
    Unknown,
}

impl TagClass {
    /// Record type to emit, or `None` for excluded tags.
    pub fn record_type(self) -> Option<RecordType> {
        match self {
            Self::Indexed(record_type) => Some(record_type),
            Self::Excluded => None,
            Self::Unknown => Some(RecordType::Content),
        }
    }
}

/// Classify a lowercase HTML tag name.
pub fn classify_tag(tag: &str) -> TagClass {
    if EXCLUDED_TAGS.contains(&tag) {
        return TagClass::Excluded;
    }
    TYPE_FOR_TAG
        .get(tag)
        .copied()
        .map_or(TagClass::Unknown, TagClass::Indexed)
}

/// Ranking level for a record type (higher = more prominent).
pub fn weight_level(record_type: RecordType) -> u32 {
    WEIGHT_FOR_TYPE.get(&record_type).copied().unwrap_or(0)
}

/// Split block text into `(hierarchy.lvl3, content)`; at most one is set.
pub fn header_and_content(record_type: RecordType, text: &str) -> (Option<&str>, Option<&str>) {
    match record_type {
        RecordType::Lvl3 => (Some(text), None),
        RecordType::Content => (None, Some(text)),
        _ => (None, None),
    }
}
