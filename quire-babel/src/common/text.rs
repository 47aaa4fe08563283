//! Plain-text helpers shared by the importer and the edit commands.

use crate::ir::nodes::{Block, Inline};
use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Unify line endings and trim surrounding whitespace.
pub fn normalize_plain_text(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// Split on blank-line boundaries (two or more consecutive newlines).
pub fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK.split(text)
}

/// Build one paragraph from a chunk of text. Each line becomes a text run,
/// with a hard break in front of every line after the first; empty lines
/// contribute only their break.
pub fn paragraph_from_chunk(chunk: &str) -> Block {
    let mut content = Vec::new();
    for (index, line) in chunk.split('\n').enumerate() {
        if index > 0 {
            content.push(Inline::HardBreak);
        }
        if !line.is_empty() {
            content.push(Inline::text(line));
        }
    }
    Block::Paragraph(content)
}

/// Normalize `text` and turn each blank-line separated chunk into a paragraph.
/// Empty input yields no paragraphs.
pub fn plain_text_to_paragraphs(text: &str) -> Vec<Block> {
    let normalized = normalize_plain_text(text);
    if normalized.is_empty() {
        return Vec::new();
    }
    split_paragraphs(&normalized)
        .map(paragraph_from_chunk)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_endings_and_trims() {
        assert_eq!(normalize_plain_text("\r\n  a\r\nb  \r\n"), "a\nb");
        assert_eq!(normalize_plain_text(" \n\t"), "");
    }

    #[test]
    fn splits_on_two_or_more_newlines() {
        let parts: Vec<_> = split_paragraphs("a\nb\n\nc\n\n\n\nd").collect();
        assert_eq!(parts, vec!["a\nb", "c", "d"]);
    }

    #[test]
    fn chunk_lines_become_runs_and_breaks() {
        assert_eq!(
            paragraph_from_chunk("one\n\ntwo"),
            Block::Paragraph(vec![
                Inline::text("one"),
                Inline::HardBreak,
                Inline::HardBreak,
                Inline::text("two"),
            ])
        );
    }

    #[test]
    fn plain_text_builds_one_paragraph_per_chunk() {
        let blocks = plain_text_to_paragraphs("\r\nfirst\r\n\r\nsecond\nline\n");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph(vec![Inline::text("first")]),
                Block::paragraph(vec![
                    Inline::text("second"),
                    Inline::HardBreak,
                    Inline::text("line"),
                ]),
            ]
        );
        assert!(plain_text_to_paragraphs("   ").is_empty());
    }
}
