//! Export tests for Markdown format (document tree → Markdown)

use insta::assert_snapshot;
use quire_babel::format::Format;
use quire_babel::formats::markdown::{serializer::serialize_to_markdown, MarkdownFormat};
use quire_babel::ir::json::document_from_value;
use quire_babel::ir::nodes::{Block, Document, Inline, ListItem, Mark};
use serde_json::json;
use std::collections::HashMap;

fn para(content: Vec<Inline>) -> Block {
    Block::paragraph(content)
}

fn item(text: &str) -> ListItem {
    ListItem::new(vec![para(vec![Inline::text(text)])])
}

#[test]
fn test_heading_and_paragraphs() {
    let doc = Document::new(vec![
        Block::heading(2, vec![Inline::text("Title")]),
        para(vec![Inline::text("Hello "), Inline::text("#tag/sub")]),
        para(vec![Inline::text("Line 2")]),
    ]);
    assert_eq!(
        serialize_to_markdown(&doc),
        "## Title\n\nHello #tag/sub\n\nLine 2"
    );
}

#[test]
fn test_bullet_list() {
    let doc = Document::new(vec![Block::bullet_list(vec![item("001"), item("ok?")])]);
    assert_eq!(serialize_to_markdown(&doc), "- 001\n- ok?");
}

#[test]
fn test_markers_typed_as_text_are_repaired() {
    let doc = Document::new(vec![para(vec![
        Inline::text("##title"),
        Inline::HardBreak,
        Inline::text("-001"),
    ])]);
    assert_eq!(serialize_to_markdown(&doc), "## title\n- 001");
}

#[test]
fn test_bold_at_line_start_is_untouched() {
    let doc = Document::new(vec![para(vec![Inline::text("**bold**")])]);
    assert_eq!(serialize_to_markdown(&doc), "**bold**");
}

#[test]
fn test_inline_marks() {
    let doc = Document::new(vec![para(vec![
        Inline::text("Hello "),
        Inline::marked("bold", [Mark::Bold]),
        Inline::text(" and "),
        Inline::marked("code", [Mark::Code]),
    ])]);
    assert_eq!(serialize_to_markdown(&doc), "Hello **bold** and `code`");
}

#[test]
fn test_code_block_ignores_marks() {
    let doc = Document::new(vec![Block::code_block(vec![
        Inline::marked("fn main() {", [Mark::Bold]),
        Inline::HardBreak,
        Inline::marked("}", [Mark::Italic]),
    ])]);
    assert_snapshot!(serialize_to_markdown(&doc), @r"
    ```
    fn main() {
    }
    ```
    ");
}

#[test]
fn test_kitchensink() {
    let doc = Document::new(vec![
        Block::heading(1, vec![Inline::text("Notes")]),
        para(vec![
            Inline::text("See "),
            Inline::marked(
                "the docs",
                [Mark::Link {
                    href: "https://docs.test".to_string(),
                }],
            ),
            Inline::text("."),
        ]),
        Block::ordered_list(vec![
            ListItem::new(vec![
                para(vec![Inline::text("first")]),
                Block::bullet_list(vec![item("nested a"), item("nested b")]),
            ]),
            ListItem::default(),
            item("second"),
        ]),
        para(vec![Inline::text("- typed item")]),
        Block::HorizontalRule,
        Block::Blockquote(vec![para(vec![
            Inline::text("quoted"),
            Inline::HardBreak,
            Inline::marked("emphasis", [Mark::Italic]),
        ])]),
    ]);

    assert_snapshot!(serialize_to_markdown(&doc), @r"
    # Notes

    See [the docs](https://docs.test).

    1. first
      - nested a
      - nested b
    2. second
    - typed item

    ---

    > quoted
    > *emphasis*
    ");
}

#[test]
fn test_export_from_json_tree() {
    let value = json!({
        "type": "doc",
        "content": [
            { "type": "heading", "attrs": { "level": 42 }, "content": [{ "type": "text", "text": "Fallback" }] },
            { "type": "orderedList", "content": [
                { "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "one" }] }] },
                { "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "two" }] }] }
            ]},
            { "type": "paragraph" }
        ]
    });
    let doc = document_from_value(&value);
    assert_eq!(serialize_to_markdown(&doc), "# Fallback\n\n1. one\n2. two");
}

#[test]
fn test_invalid_roots_export_empty() {
    for value in [json!(null), json!(7), json!({}), json!([])] {
        assert_eq!(serialize_to_markdown(&document_from_value(&value)), "");
    }
}

#[test]
fn test_format_options() {
    let doc = Document::new(vec![
        para(vec![Inline::text("- a")]),
        para(vec![Inline::text("-b")]),
    ]);

    assert_eq!(MarkdownFormat.serialize(&doc).unwrap(), "- a\n- b");

    let mut options = HashMap::new();
    options.insert("join-list-lines".to_string(), "false".to_string());
    options.insert("normalize-markers".to_string(), "false".to_string());
    assert_eq!(
        MarkdownFormat.serialize_with_options(&doc, &options).unwrap(),
        "- a\n\n-b"
    );
}
