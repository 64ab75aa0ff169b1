//! Splits per-page document text into bounded, page-tagged passages.
//!
//! Pages are processed independently and their chunks concatenated in page
//! order. Within a page the text is whitespace-normalized, split into
//! sentence-like units on terminal punctuation, and greedily packed up to
//! the target size. Units are never split further, so a single sentence
//! longer than the target produces one oversized chunk.

use serde::{Deserialize, Serialize};

/// Raw text attributed to one page of a source document. Page numbers are
/// 1-based and in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// A contiguous, non-empty span of a page's text, tagged with its page of
/// origin. Immutable once produced; emission order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub page_number: u32,
    pub text: String,
}

/// Segments the given pages into chunks of roughly `target_size` characters.
pub fn segment_pages(pages: &[PageText], target_size: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for page in pages {
        segment_page(page, target_size, &mut chunks);
    }

    chunks
}

fn segment_page(page: &PageText, target_size: usize, chunks: &mut Vec<Chunk>) {
    let normalized = normalize_whitespace(&page.text);
    if normalized.is_empty() {
        return;
    }

    if normalized.chars().count() <= target_size {
        chunks.push(Chunk {
            page_number: page.page_number,
            text: normalized,
        });
        return;
    }

    let mut buffer = String::new();
    let mut buffer_len = 0usize;

    for unit in sentence_units(&normalized) {
        let unit_len = unit.chars().count();

        if buffer_len + unit_len > target_size && buffer_len > 0 {
            push_chunk(chunks, page.page_number, &buffer);
            buffer.clear();
            buffer_len = 0;
        }

        buffer.push_str(unit);
        buffer_len += unit_len;
    }

    if !buffer.trim().is_empty() {
        push_chunk(chunks, page.page_number, &buffer);
    }
}

fn push_chunk(chunks: &mut Vec<Chunk>, page_number: u32, text: &str) {
    chunks.push(Chunk {
        page_number,
        text: text.trim().to_string(),
    });
}

/// Collapses whitespace runs to single spaces and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits text into sentence-like units, each keeping its trailing run of
/// terminal punctuation. A trailing fragment without terminal punctuation is
/// kept as a unit of its own; text with no terminal punctuation at all is a
/// single unit.
fn sentence_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((idx, ch)) = iter.next() {
        if is_terminal(ch) && !iter.peek().is_some_and(|(_, next)| is_terminal(*next)) {
            let end = idx + ch.len_utf8();
            units.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        units.push(&text[start..]);
    }

    units
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}
