//! End-to-end transform: forum export → ordered search records.

use tracing::{debug, info, instrument, trace, warn};

use forumindex_segment::PostBody;
use forumindex_shared::{
    ForumIndexError, Hierarchy, Post, Result, SearchRecord, SourceDocument, TransformConfig,
};

use crate::filter::{admit, visible_categories};
use crate::hierarchy::{TagClass, classify_tag, header_and_content};
use crate::records::{RecordSeed, build_records};

/// Tag appended to records of topics with an accepted answer.
pub const ANSWERED_TAG: &str = "answered";

/// Characters of block text shown when warning about unknown tags.
const PREVIEW_CHARS: usize = 80;

/// Result of a transform run.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Records in post order, then block order, then split order.
    pub records: Vec<SearchRecord>,
    /// Posts in the source document.
    pub posts_seen: usize,
    /// Posts that produced records.
    pub posts_indexed: usize,
    /// Posts dropped by the visibility filter.
    pub posts_skipped: usize,
}

/// Parse the source collector's JSON export.
pub fn parse_document(input: &str) -> Result<SourceDocument> {
    serde_json::from_str(input)
        .map_err(|e| ForumIndexError::parse(format!("invalid source document: {e}")))
}

/// Transform every admitted post of the document.
///
/// 1. Build the public category map
/// 2. Drop hidden, deleted and non-public posts
/// 3. Segment, classify and build records for each remaining post
#[instrument(skip_all, fields(posts = doc.posts.len()))]
pub fn transform(doc: &SourceDocument, config: &TransformConfig) -> Result<TransformOutput> {
    let categories = visible_categories(doc.categories.as_deref());
    debug!(public_categories = categories.len(), "category map built");

    let mut records = Vec::new();
    let mut posts_indexed = 0;

    for post in &doc.posts {
        let Some(category) = admit(post, &categories) else {
            continue;
        };
        records.extend(transform_post(post, category, config)?);
        posts_indexed += 1;
    }

    let output = TransformOutput {
        posts_seen: doc.posts.len(),
        posts_indexed,
        posts_skipped: doc.posts.len() - posts_indexed,
        records,
    };

    info!(
        posts = output.posts_seen,
        indexed = output.posts_indexed,
        skipped = output.posts_skipped,
        records = output.records.len(),
        "transform complete"
    );

    Ok(output)
}

/// Build the records of a single admitted post.
///
/// `position` counts every non-blank top-level block, including excluded ones.
#[instrument(skip_all, fields(post_id = post.id))]
pub fn transform_post(
    post: &Post,
    category: &str,
    config: &TransformConfig,
) -> Result<Vec<SearchRecord>> {
    let url = post_url(&config.base_url, post);
    let tags = post_tags(&config.tags, post.topic_accepted_answer);
    let body = PostBody::parse(&post.cooked);

    let mut records = Vec::new();
    for (position, block) in body.blocks().enumerate() {
        let class = classify_tag(&block.tag);
        match class {
            TagClass::Excluded => {
                trace!(tag = %block.tag, position, "excluded block");
                continue;
            }
            TagClass::Unknown => warn!(
                tag = %block.tag,
                text = %preview(&block.text),
                %url,
                "unknown html element, indexing as content"
            ),
            TagClass::Indexed(_) => {}
        }
        let Some(record_type) = class.record_type() else {
            continue;
        };

        let (lvl3, content) = header_and_content(record_type, &block.text);
        let hierarchy = Hierarchy {
            lvl0: config.lvl0.clone(),
            lvl1: category.to_string(),
            lvl2: post.topic_title.clone(),
            lvl3: lvl3.map(str::to_owned),
        };
        let seed = RecordSeed {
            content,
            record_type,
            tags: &tags,
            url: &url,
            hierarchy: &hierarchy,
            position,
        };
        records.extend(build_records(&seed, config.max_record_bytes)?);
    }

    Ok(records)
}

/// Deep link to a post.
pub fn post_url(base_url: &str, post: &Post) -> String {
    format!("{base_url}{}", post.topic_path())
}

/// Base tags, plus [`ANSWERED_TAG`] for solved topics.
pub fn post_tags(base_tags: &[String], accepted_answer: bool) -> Vec<String> {
    let mut tags = base_tags.to_vec();
    if accepted_answer {
        tags.push(ANSWERED_TAG.to_string());
    }
    tags
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
