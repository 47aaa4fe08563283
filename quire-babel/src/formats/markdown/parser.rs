//! Markdown parsing (markdown → document tree import)
//!
//! Deliberately minimal: the tree is the source of truth and imported text is
//! treated as prose. Blank-line separated chunks become paragraphs and single
//! newlines become hard breaks. Headings, lists and code fences stay literal
//! text, so a `# Title` line comes back as a paragraph that exports to the same
//! `# Title` line.

use crate::common::text::{normalize_plain_text, paragraph_from_chunk, split_paragraphs};
use crate::ir::nodes::Document;

/// Parse markdown text into a document. Empty input yields a single empty paragraph.
pub fn parse_from_markdown(source: &str) -> Document {
    let normalized = normalize_plain_text(source);
    if normalized.is_empty() {
        return Document::blank();
    }

    let children = split_paragraphs(&normalized)
        .map(|chunk| paragraph_from_chunk(chunk.trim_end()))
        .collect();
    Document { children }
}
