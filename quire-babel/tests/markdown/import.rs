//! Import tests for Markdown format (Markdown → document tree)
//!
//! Import is paragraph-level only: markdown syntax survives as literal text.

use quire_babel::format::Format;
use quire_babel::formats::markdown::MarkdownFormat;
use quire_babel::ir::json::document_to_value;
use quire_babel::ir::nodes::{Block, Document, Inline};
use quire_babel::FormatRegistry;
use serde_json::json;

fn import(md: &str) -> Document {
    MarkdownFormat.parse(md).unwrap()
}

#[test]
fn test_empty_input_gives_one_empty_paragraph() {
    for md in ["", "\n\n", "  \r\n\t"] {
        assert_eq!(import(md), Document::blank(), "input {md:?}");
    }
}

#[test]
fn test_blank_lines_separate_paragraphs() {
    let doc = import("first\n\n\n\nsecond\r\n\r\nthird");
    assert_eq!(
        doc.children,
        vec![
            Block::paragraph(vec![Inline::text("first")]),
            Block::paragraph(vec![Inline::text("second")]),
            Block::paragraph(vec![Inline::text("third")]),
        ]
    );
}

#[test]
fn test_single_newlines_become_hard_breaks() {
    let doc = import("a\nb\n c");
    assert_eq!(
        doc.children,
        vec![Block::paragraph(vec![
            Inline::text("a"),
            Inline::HardBreak,
            Inline::text("b"),
            Inline::HardBreak,
            Inline::text(" c"),
        ])]
    );
}

#[test]
fn test_markdown_structure_is_not_reconstructed() {
    let doc = import("# Heading\n\n- item\n- item\n\n```\ncode\n```");
    assert!(doc
        .children
        .iter()
        .all(|block| matches!(block, Block::Paragraph(_))));
    assert_eq!(doc.children.len(), 3);
}

#[test]
fn test_import_to_json_tree() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("Hi\nthere", "markdown").unwrap();
    assert_eq!(
        document_to_value(&doc),
        json!({
            "type": "doc",
            "content": [{ "type": "paragraph", "content": [
                { "type": "text", "text": "Hi" },
                { "type": "hardBreak" },
                { "type": "text", "text": "there" }
            ]}]
        })
    );
}
