//! Output rendering for the index loader.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use forumindex_shared::{ForumIndexError, Result, SearchRecord};

/// Render records as a pretty JSON array with sorted keys and four-space indent.
///
/// Going through `serde_json::Value` sorts object keys, so the output is
/// byte-stable for identical input.
pub fn render_records(records: &[SearchRecord]) -> Result<String> {
    let value = serde_json::to_value(records)?;

    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');

    String::from_utf8(buf).map_err(|e| ForumIndexError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forumindex_shared::{Hierarchy, RecordType, Weight};

    fn record() -> SearchRecord {
        let hierarchy = Hierarchy {
            lvl0: "Forum".into(),
            lvl1: "Uncategorized".into(),
            lvl2: "test title".into(),
            lvl3: None,
        };
        SearchRecord {
            content: Some("test content".into()),
            content_camel: Some("test content".into()),
            tags: vec!["community".into()],
            record_type: RecordType::Content,
            url: "http://example.com/t/test-title/1/1".into(),
            hierarchy_camel: vec![hierarchy.clone()],
            hierarchy,
            weight: Weight {
                level: 0,
                position: 0,
            },
            object_id: "0f".into(),
        }
    }

    #[test]
    fn keys_are_sorted() {
        let out = render_records(&[record()]).unwrap();
        let keys = [
            "\"content\"",
            "\"content_camel\"",
            "\"hierarchy\"",
            "\"hierarchy_camel\"",
            "\"objectID\"",
            "\"tags\"",
            "\"type\"",
            "\"url\"",
            "\"weight\"",
        ];
        let offsets: Vec<usize> = keys
            .iter()
            .map(|k| out.find(k).unwrap_or_else(|| panic!("missing {k}")))
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{out}");
    }

    #[test]
    fn uses_four_space_indent() {
        let out = render_records(&[record()]).unwrap();
        assert!(out.starts_with("[\n    {\n        \"content\": \"test content\","));
        assert!(out.ends_with("]\n"));
        assert!(out.contains("\"lvl3\": null"));
    }

    #[test]
    fn empty_output_is_an_empty_array() {
        assert_eq!(render_records(&[]).unwrap(), "[]\n");
    }
}
