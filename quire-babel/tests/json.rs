//! JSON tree boundary: lenient decoding and exact encoding.

use insta::assert_snapshot;
use quire_babel::format::Format;
use quire_babel::formats::json::JsonFormat;
use quire_babel::ir::json::{document_from_value, document_to_value};
use quire_babel::ir::nodes::{Block, Inline, Mark};
use quire_babel::{to_markdown, FormatError, FormatRegistry};
use serde_json::{json, Value};

#[test]
fn test_unknown_containers_are_flattened() {
    let value = json!({
        "type": "doc",
        "content": [
            { "type": "callout", "content": [
                { "type": "paragraph", "content": [{ "type": "text", "text": "inside" }] }
            ]},
            { "type": "image", "attrs": { "src": "x.png" } },
            { "type": "paragraph", "content": [
                { "type": "mention", "content": [{ "type": "text", "text": "@sam" }] },
                { "type": "text", "text": " hi", "marks": [{ "type": "link" }, "bold", { "type": "italic" }] }
            ]}
        ]
    });

    let doc = document_from_value(&value);
    assert_eq!(
        doc.children,
        vec![
            Block::paragraph(vec![Inline::text("inside")]),
            Block::paragraph(vec![
                Inline::text("@sam"),
                Inline::marked(" hi", [Mark::Italic]),
            ]),
        ]
    );
    assert_eq!(to_markdown(&doc), "inside\n\n@sam* hi*");
}

#[test]
fn test_encode_decode_keeps_the_tree() {
    let registry = FormatRegistry::default();
    let doc = registry
        .parse(
            r#"{"type":"doc","content":[
                {"type":"blockquote","content":[{"type":"paragraph","content":[{"type":"text","text":"q"}]}]},
                {"type":"horizontalRule"},
                {"type":"codeBlock","content":[{"type":"text","text":"let x = 1;"}]}
            ]}"#,
            "json",
        )
        .unwrap();

    let encoded = registry.serialize(&doc, "json").unwrap();
    assert_eq!(registry.parse(&encoded, "json").unwrap(), doc);
    assert_snapshot!(to_markdown(&doc), @r"
    > q

    ---

    ```
    let x = 1;
    ```
    ");
}

#[test]
fn test_encoder_omits_empty_fields() {
    let doc = JsonFormat.parse(r#"{"type":"doc","content":[{"type":"paragraph","content":[]}]}"#);
    let value = document_to_value(&doc.unwrap());
    assert_eq!(value, json!({ "type": "doc", "content": [{ "type": "paragraph" }] }));
}

#[test]
fn test_invalid_json_text_fails() {
    let err = JsonFormat.parse("{\"type\": ").unwrap_err();
    assert!(matches!(err, FormatError::ParseError(_)));
    assert!(document_from_value(&Value::Bool(true)).children.is_empty());
}
