//! JSON tree boundary format.
//!
//! The persistence layer stores documents as a node tree keyed by `type`,
//! `attrs`, `content`, `text` and `marks`. Decoding is lenient: anything that
//! is not a recognizable node contributes nothing, and containers of unknown
//! type are flattened into their parent so their content still survives.

use crate::ir::nodes::{Block, Document, HeadingLevel, Inline, ListItem, Mark, Text};
use serde_json::{json, Map, Value};

/// Decode a JSON tree into a [`Document`]. Never fails; malformed input yields
/// an empty document.
pub fn document_from_value(value: &Value) -> Document {
    let mut children = Vec::new();
    decode_block(value, &mut children);
    Document { children }
}

/// Encode a [`Document`] as a JSON tree.
pub fn document_to_value(doc: &Document) -> Value {
    let mut node = Map::new();
    node.insert("type".to_string(), json!("doc"));
    node.insert(
        "content".to_string(),
        Value::Array(doc.children.iter().map(block_to_value).collect()),
    );
    Value::Object(node)
}

fn node_type(node: &Map<String, Value>) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

fn node_children(node: &Map<String, Value>) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn decode_blocks(node: &Map<String, Value>) -> Vec<Block> {
    let mut blocks = Vec::new();
    for child in node_children(node) {
        decode_block(child, &mut blocks);
    }
    blocks
}

fn decode_block(value: &Value, out: &mut Vec<Block>) {
    let Some(node) = value.as_object() else {
        tracing::trace!("skipping non-object node");
        return;
    };
    let Some(kind) = node_type(node) else {
        tracing::trace!("skipping node without a type tag");
        return;
    };

    match kind {
        "paragraph" => out.push(Block::Paragraph(decode_inlines(node))),
        "heading" => out.push(Block::Heading {
            level: heading_level(node),
            content: decode_inlines(node),
        }),
        "codeBlock" => out.push(Block::CodeBlock(decode_inlines(node))),
        "blockquote" => out.push(Block::Blockquote(decode_blocks(node))),
        "bulletList" => out.push(Block::BulletList(decode_list_items(node))),
        "orderedList" => out.push(Block::OrderedList(decode_list_items(node))),
        "horizontalRule" => out.push(Block::HorizontalRule),
        other => {
            // `doc`, stray `listItem`s and unknown wrappers: keep their content.
            tracing::trace!(kind = other, "flattening unrecognized container");
            for child in node_children(node) {
                decode_block(child, out);
            }
        }
    }
}

fn decode_list_items(node: &Map<String, Value>) -> Vec<ListItem> {
    node_children(node)
        .iter()
        .filter_map(Value::as_object)
        .filter(|child| node_type(child) == Some("listItem"))
        .map(|child| ListItem {
            children: decode_blocks(child),
        })
        .collect()
}

fn heading_level(node: &Map<String, Value>) -> HeadingLevel {
    node.get("attrs")
        .and_then(Value::as_object)
        .and_then(|attrs| attrs.get("level"))
        .and_then(Value::as_f64)
        .filter(|level| level.is_finite() && (1.0..=6.0).contains(level))
        .map(|level| HeadingLevel::new(level as u8))
        .unwrap_or_default()
}

fn decode_inlines(node: &Map<String, Value>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in node_children(node) {
        collect_inlines(child, &mut inlines);
    }
    inlines
}

fn collect_inlines(value: &Value, out: &mut Vec<Inline>) {
    let Some(node) = value.as_object() else {
        return;
    };
    if node_type(node) == Some("hardBreak") {
        out.push(Inline::HardBreak);
        return;
    }
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        if text.is_empty() {
            tracing::trace!("dropping empty text run");
        } else {
            out.push(Inline::marked(text, decode_marks(node)));
        }
        return;
    }
    for child in node_children(node) {
        collect_inlines(child, out);
    }
}

fn decode_marks(node: &Map<String, Value>) -> Vec<Mark> {
    let Some(marks) = node.get("marks").and_then(Value::as_array) else {
        return Vec::new();
    };
    marks
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|mark| match node_type(mark)? {
            "bold" => Some(Mark::Bold),
            "italic" => Some(Mark::Italic),
            "code" => Some(Mark::Code),
            "link" => mark
                .get("attrs")
                .and_then(Value::as_object)
                .and_then(|attrs| attrs.get("href"))
                .and_then(Value::as_str)
                .map(|href| Mark::Link {
                    href: href.to_string(),
                }),
            _ => None,
        })
        .collect()
}

fn typed(kind: &str) -> Map<String, Value> {
    let mut node = Map::new();
    node.insert("type".to_string(), json!(kind));
    node
}

fn with_content(mut node: Map<String, Value>, content: Vec<Value>) -> Value {
    if !content.is_empty() {
        node.insert("content".to_string(), Value::Array(content));
    }
    Value::Object(node)
}

fn block_to_value(block: &Block) -> Value {
    match block {
        Block::Paragraph(content) => with_content(typed("paragraph"), inlines_to_values(content)),
        Block::Heading { level, content } => {
            let mut node = typed("heading");
            node.insert("attrs".to_string(), json!({ "level": level.get() }));
            with_content(node, inlines_to_values(content))
        }
        Block::CodeBlock(content) => with_content(typed("codeBlock"), inlines_to_values(content)),
        Block::Blockquote(children) => with_content(
            typed("blockquote"),
            children.iter().map(block_to_value).collect(),
        ),
        Block::BulletList(items) => with_content(typed("bulletList"), items_to_values(items)),
        Block::OrderedList(items) => with_content(typed("orderedList"), items_to_values(items)),
        Block::HorizontalRule => Value::Object(typed("horizontalRule")),
    }
}

fn items_to_values(items: &[ListItem]) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            with_content(
                typed("listItem"),
                item.children.iter().map(block_to_value).collect(),
            )
        })
        .collect()
}

fn inlines_to_values(content: &[Inline]) -> Vec<Value> {
    content.iter().map(inline_to_value).collect()
}

fn inline_to_value(inline: &Inline) -> Value {
    match inline {
        Inline::HardBreak => Value::Object(typed("hardBreak")),
        Inline::Text(Text { text, marks }) => {
            let mut node = typed("text");
            node.insert("text".to_string(), json!(text));
            if !marks.is_empty() {
                node.insert(
                    "marks".to_string(),
                    Value::Array(marks.iter().map(mark_to_value).collect()),
                );
            }
            Value::Object(node)
        }
    }
}

fn mark_to_value(mark: &Mark) -> Value {
    match mark {
        Mark::Bold => json!({ "type": "bold" }),
        Mark::Italic => json!({ "type": "italic" }),
        Mark::Code => json!({ "type": "code" }),
        Mark::Link { href } => json!({ "type": "link", "attrs": { "href": href } }),
    }
}
