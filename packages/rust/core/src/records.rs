//! Size-bounded record building.
//!
//! A block becomes one record unless its compact JSON exceeds the size limit,
//! in which case the content is halved by character count until every piece
//! fits. Each piece keeps the block's position and gets its own identifier
//! derived from its character offset within the block. Header records have no
//! content to split; their header text is shortened instead.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

use forumindex_shared::{ForumIndexError, Hierarchy, RecordType, Result, SearchRecord, Weight};

use crate::hierarchy::weight_level;

/// Fields shared by every record built from one block.
#[derive(Debug, Clone)]
pub struct RecordSeed<'a> {
    /// Block text for content records, `None` for headers.
    pub content: Option<&'a str>,
    pub record_type: RecordType,
    pub tags: &'a [String],
    pub url: &'a str,
    pub hierarchy: &'a Hierarchy,
    /// Block index within the post.
    pub position: usize,
}

impl RecordSeed<'_> {
    fn record(&self, chunk: Option<&str>, chunk_start: usize) -> Result<SearchRecord> {
        self.record_with(self.hierarchy, chunk, chunk_start)
    }

    fn record_with(
        &self,
        hierarchy: &Hierarchy,
        chunk: Option<&str>,
        chunk_start: usize,
    ) -> Result<SearchRecord> {
        Ok(SearchRecord {
            content: chunk.map(str::to_owned),
            content_camel: chunk.map(str::to_owned),
            tags: self.tags.to_vec(),
            record_type: self.record_type,
            url: self.url.to_owned(),
            hierarchy: hierarchy.clone(),
            hierarchy_camel: vec![hierarchy.clone()],
            weight: Weight {
                level: weight_level(self.record_type),
                position: self.position,
            },
            object_id: object_id(self.url, hierarchy, self.position, chunk_start)?,
        })
    }

    fn too_large(&self, size: usize, limit: usize) -> ForumIndexError {
        ForumIndexError::RecordTooLarge {
            url: self.url.to_owned(),
            position: self.position,
            size,
            limit,
        }
    }
}

/// Deterministic record identifier.
///
/// SHA-1 hex of the JSON array `[url, hierarchy, position, chunk_start]`,
/// encoded the way Python's `json.dumps` does by default, so identifiers
/// already stored in an index keep matching.
pub fn object_id(
    url: &str,
    hierarchy: &Hierarchy,
    position: usize,
    chunk_start: usize,
) -> Result<String> {
    let key = identity_key(url, hierarchy, position, chunk_start)?;
    let mut hasher = Sha1::new();
    hasher.update(&key);
    Ok(format!("{:x}", hasher.finalize()))
}

fn identity_key(
    url: &str,
    hierarchy: &Hierarchy,
    position: usize,
    chunk_start: usize,
) -> Result<Vec<u8>> {
    let mut key = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut key, SpacedAsciiFormatter);
    (url, hierarchy, position, chunk_start).serialize(&mut ser)?;
    Ok(key)
}

/// `", "` and `": "` separators; anything outside printable ASCII is written
/// as `\uXXXX` (UTF-16 code units, lowercase hex).
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Length in bytes of the record's compact JSON encoding.
pub fn serialized_len(record: &SearchRecord) -> Result<usize> {
    Ok(serde_json::to_vec(record)?.len())
}

/// Build the record(s) for one block, splitting content until each record
/// serializes to at most `max_bytes`.
///
/// Records come back in text order. A header record that is over the limit
/// gets its `lvl3` text shortened instead. Fails with
/// [`ForumIndexError::RecordTooLarge`] when a record with a single character
/// of content, or a header record with empty header text, is still over the
/// limit.
pub fn build_records(seed: &RecordSeed<'_>, max_bytes: usize) -> Result<Vec<SearchRecord>> {
    let Some(content) = seed.content else {
        return build_header(seed, max_bytes).map(|record| vec![record]);
    };

    let mut records = Vec::new();
    // (chunk, absolute char offset); popped in text order
    let mut pending: Vec<(&str, usize)> = vec![(content, 0)];

    while let Some((text, chunk_start)) = pending.pop() {
        let record = seed.record(Some(text), chunk_start)?;
        let size = serialized_len(&record)?;
        if size <= max_bytes {
            records.push(record);
            continue;
        }

        let char_count = text.chars().count();
        if char_count < 2 {
            return Err(seed.too_large(size, max_bytes));
        }

        let mid = char_count / 2;
        let (first, second) = split_at_char(text, mid);
        debug!(
            url = seed.url,
            record_type = %seed.record_type,
            position = seed.position,
            chunk_start,
            chars = char_count,
            size,
            "splitting oversized record"
        );
        pending.push((second, chunk_start + mid));
        pending.push((first, chunk_start));
    }

    Ok(records)
}

/// Header record, with `lvl3` cut down by characters until the record fits.
fn build_header(seed: &RecordSeed<'_>, max_bytes: usize) -> Result<SearchRecord> {
    let mut record = seed.record(None, 0)?;
    let mut size = serialized_len(&record)?;
    let original_size = size;

    while size > max_bytes {
        let header = record.hierarchy.lvl3.as_deref().unwrap_or_default();
        let chars = header.chars().count();
        if chars == 0 {
            return Err(seed.too_large(size, max_bytes));
        }

        // lvl3 is serialized twice (hierarchy and its mirror), each char at least one byte.
        let cut = (size - max_bytes).div_ceil(2).min(chars);
        let hierarchy = Hierarchy {
            lvl3: Some(header.chars().take(chars - cut).collect()),
            ..seed.hierarchy.clone()
        };
        record = seed.record_with(&hierarchy, None, 0)?;
        size = serialized_len(&record)?;
    }

    if size != original_size {
        warn!(
            url = seed.url,
            record_type = %seed.record_type,
            position = seed.position,
            size = original_size,
            limit = max_bytes,
            "header too long for one record, truncating"
        );
    }

    Ok(record)
}

/// Split after the first `n` characters.
fn split_at_char(text: &str, n: usize) -> (&str, &str) {
    let idx = text
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(idx, _)| idx);
    text.split_at(idx)
}
