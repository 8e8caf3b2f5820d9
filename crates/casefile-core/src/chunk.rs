//! Fixed-size text chunker.
//!
//! Splits a document's extracted text into consecutive, non-overlapping
//! [`ContentChunk`]s of at most `max_chars` characters each, preserving
//! the original character order. The final chunk may be shorter.
//!
//! Boundaries are counted in characters, not bytes, so multi-byte UTF-8
//! sequences are never split.
//!
//! # Guarantees
//!
//! - At least one chunk is always returned (empty text yields a single
//!   chunk with empty content), so downstream citation logic can rely
//!   on every document having a chunk at order 0.
//! - Chunk orders are contiguous: `0, 1, 2, …, N-1`.
//! - Concatenating chunk contents in order reproduces the input exactly.

use uuid::Uuid;

use crate::models::ContentChunk;

/// Reference chunk size used by the upload pipeline.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

/// Split `text` into fixed-size chunks tagged with `document_id`.
///
/// A `max_chars` of 0 is treated as 1 so the function stays total over
/// all inputs.
pub fn chunk_text(document_id: &str, text: &str, max_chars: usize) -> Vec<ContentChunk> {
    let max_chars = max_chars.max(1);

    if text.is_empty() {
        return vec![make_chunk(document_id, 0, "")];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut seen = 0;

    for (idx, ch) in text.char_indices() {
        seen += 1;
        if seen == max_chars {
            let end = idx + ch.len_utf8();
            chunks.push(make_chunk(document_id, chunks.len(), &text[start..end]));
            start = end;
            seen = 0;
        }
    }

    if start < text.len() {
        chunks.push(make_chunk(document_id, chunks.len(), &text[start..]));
    }

    chunks
}

fn make_chunk(document_id: &str, order: usize, content: &str) -> ContentChunk {
    ContentChunk {
        id: Uuid::new_v4().to_string(),
        document_id: document_id.to_string(),
        content: content.to_string(),
        order,
        embedding: Vec::new(),
    }
}
