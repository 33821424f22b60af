//! Post body segmentation.
//!
//! Splits a post's rendered HTML into its top-level blocks, in document order,
//! each labelled with the block's tag name and its trimmed text. Parsing goes
//! through `scraper` (html5ever), so malformed or truncated markup is repaired
//! rather than rejected.

use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::trace;

/// Tag reported for bare text sitting directly at the top level of a post.
pub const TEXT_NODE_TAG: &str = "#text";

/// One top-level node of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Lowercase tag name of the top-level node (or [`TEXT_NODE_TAG`]).
    pub tag: String,
    /// All descendant text, concatenated and trimmed. Never empty.
    pub text: String,
}

impl ContentBlock {
    /// Build a block, or `None` when the text is blank after trimming.
    fn from_raw(tag: impl Into<String>, raw_text: &str) -> Option<Self> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            tag: tag.into(),
            text: text.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Parsed body
// ---------------------------------------------------------------------------

/// A parsed post body.
pub struct PostBody {
    doc: Html,
}

impl PostBody {
    /// Parse an HTML fragment. Never fails.
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_fragment(html);
        if !doc.errors.is_empty() {
            trace!(errors = doc.errors.len(), "recovered from malformed post html");
        }
        Self { doc }
    }

    /// Lazily yield the non-blank top-level blocks in document order.
    ///
    /// Only the top-level tag is reported; nested markup contributes its text
    /// and nothing else. Comments and other non-text nodes are skipped.
    pub fn blocks(&self) -> impl Iterator<Item = ContentBlock> + '_ {
        // Fragments are parsed under a synthetic <html> root.
        self.doc
            .root_element()
            .children()
            .filter_map(|node| match node.value() {
                Node::Element(el) => {
                    let text = ElementRef::wrap(node)?.text().collect::<String>();
                    ContentBlock::from_raw(el.name(), &text)
                }
                Node::Text(text) => ContentBlock::from_raw(TEXT_NODE_TAG, &**text),
                _ => None,
            })
    }
}

/// Segment an HTML string into its top-level blocks.
pub fn segment(html: &str) -> Vec<ContentBlock> {
    PostBody::parse(html).blocks().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block(tag: &str, text: &str) -> ContentBlock {
        ContentBlock {
            tag: tag.into(),
            text: text.into(),
        }
    }

    #[test]
    fn segments_header_and_paragraph() {
        let blocks = segment("<h1>header</h1><p><em>cool</em> test</p>");
        assert_eq!(blocks, vec![block("h1", "header"), block("p", "cool test")]);
    }

    #[test]
    fn empty_html_has_no_blocks() {
        assert!(segment("").is_empty());
        assert!(segment("   \n  ").is_empty());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let blocks = segment("<h1>header</h1><p> <em>cool</em> test</p>");
        assert_eq!(blocks, vec![block("h1", "header"), block("p", "cool test")]);
    }

    #[test]
    fn skips_blank_blocks_and_separators() {
        let html = "<p>first</p>\n\n<p>   </p>\n<div><br></div>\n<p>second</p>";
        let blocks = segment(html);
        assert_eq!(blocks, vec![block("p", "first"), block("p", "second")]);
    }

    #[test]
    fn nested_markup_keeps_top_level_tag() {
        let html = "<ul>\n<li>one</li>\n<li><h2>two</h2></li>\n</ul>";
        let blocks = segment(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tag, "ul");
        assert_eq!(blocks[0].text, "one\ntwo");
    }

    #[test]
    fn bare_text_becomes_text_block() {
        let blocks = segment("intro words <p>para</p>");
        assert_eq!(
            blocks,
            vec![block(TEXT_NODE_TAG, "intro words"), block("p", "para")]
        );
    }

    #[test]
    fn comments_are_ignored() {
        let blocks = segment("<!-- note --><p>visible</p>");
        assert_eq!(blocks, vec![block("p", "visible")]);
    }

    #[test]
    fn tolerates_unclosed_tags() {
        let blocks = segment("<p>unclosed <b>bold");
        assert_eq!(blocks, vec![block("p", "unclosed bold")]);
    }

    #[test]
    fn tolerates_stray_end_tags() {
        let blocks = segment("</div><h2>Title</h2></span>");
        assert_eq!(blocks, vec![block("h2", "Title")]);
    }

    #[test]
    fn keeps_excludable_blocks_for_the_classifier() {
        let html = r#"<aside class="quote"><blockquote>quoted</blockquote></aside><p>reply</p>"#;
        let blocks = segment(html);
        assert_eq!(blocks, vec![block("aside", "quoted"), block("p", "reply")]);
    }

    #[test]
    fn images_without_text_produce_nothing() {
        let blocks = segment(r#"<img src="a.png" alt="diagram"><p>caption</p>"#);
        assert_eq!(blocks, vec![block("p", "caption")]);
    }

    #[test]
    fn blocks_are_lazy_and_ordered() {
        let body = PostBody::parse("<h3>a</h3><p>b</p><pre><code>c</code></pre>");
        let mut blocks = body.blocks();
        assert_eq!(blocks.next(), Some(block("h3", "a")));
        assert_eq!(blocks.next(), Some(block("p", "b")));
        assert_eq!(blocks.next(), Some(block("pre", "c")));
        assert_eq!(blocks.next(), None);
    }
}
