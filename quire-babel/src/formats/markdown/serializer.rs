//! Markdown serialization (document tree → markdown export)
//!
//! Pipeline: Document → one markdown string per top-level block → merge pass
//! → newline collapse and trim.
//!
//! The merge pass is textual: blocks whose first lines both look like list
//! items are joined with a single newline so hand-typed `- item` paragraphs
//! stay grouped with real lists. It only looks at rendered output, never at
//! the tree.

use super::inline::{extract_block_plain_text, render_block_inline};
use super::list::{render_list, ListContext};
use super::rules::MarkdownRules;
use crate::ir::nodes::{Block, Document};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})[^\s#]").unwrap());
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\S").unwrap());
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)\.\S").unwrap());
static LIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*]|[0-9]+\.)\s+\S").unwrap());
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Serialize a document to markdown with the default rules.
pub fn serialize_to_markdown(doc: &Document) -> String {
    serialize_with_rules(doc, &MarkdownRules::default())
}

/// Serialize a document to markdown.
pub fn serialize_with_rules(doc: &Document, rules: &MarkdownRules) -> String {
    let blocks = doc
        .children
        .iter()
        .filter_map(|block| export_block(block, rules))
        .collect();
    merge_blocks(blocks, rules)
}

/// One top-level block as markdown, or `None` if it renders empty.
fn export_block(block: &Block, rules: &MarkdownRules) -> Option<String> {
    if let Some((kind, items)) = block.as_list() {
        let lines = render_list(items, ListContext::new(kind, 0), rules);
        return (!lines.is_empty()).then(|| lines.join("\n"));
    }
    render_block(block, rules)
}

/// Render a single non-list block by its kind.
///
/// Lists return `None` here; they go through the list renderer, which needs
/// nesting context.
pub fn render_block(block: &Block, rules: &MarkdownRules) -> Option<String> {
    if block.is_list() {
        return None;
    }
    if let Block::HorizontalRule = block {
        return Some("---".to_string());
    }

    let rendered = render_block_inline(block);
    let text = rendered.trim_end();
    if text.is_empty() {
        return None;
    }

    match block {
        Block::Heading { level, .. } => {
            Some(format!("{} {text}", "#".repeat(usize::from(level.get()))))
        }
        Block::CodeBlock(_) => {
            let raw = extract_block_plain_text(block);
            let raw = raw.trim_end();
            (!raw.is_empty()).then(|| format!("```\n{raw}\n```"))
        }
        Block::Blockquote(_) => Some(
            normalize_block(text, rules)
                .split('\n')
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Block::Paragraph(_) => Some(normalize_block(text, rules)),
        Block::BulletList(_) | Block::OrderedList(_) | Block::HorizontalRule => None,
    }
}

fn normalize_block(text: &str, rules: &MarkdownRules) -> String {
    if rules.normalize_markers {
        normalize_markdown_block(text)
    } else {
        text.to_string()
    }
}

/// Insert the missing space after a heading or list marker typed as plain text.
///
/// `##title` → `## title`, `-001` → `- 001`, `1.foo` → `1. foo`. Lines that
/// start with anything else, including `**bold**`, are returned unchanged.
pub fn normalize_markdown_line(line: &str) -> String {
    let split_at = if let Some(caps) = HEADING_MARKER.captures(line) {
        caps.get(1).map(|hashes| hashes.end())
    } else if BULLET_MARKER.is_match(line) {
        Some(1)
    } else {
        ORDERED_MARKER
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|digits| digits.end() + 1)
    };

    match split_at {
        Some(at) => format!("{} {}", &line[..at], &line[at..]),
        None => line.to_string(),
    }
}

/// Apply [`normalize_markdown_line`] to every line of `text`.
pub fn normalize_markdown_block(text: &str) -> String {
    text.split('\n')
        .map(normalize_markdown_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether `line` starts like a markdown list item (`- x`, `* x`, `3. x`).
pub fn is_list_line(line: &str) -> bool {
    LIST_LINE.is_match(line.trim_start())
}

fn first_line(block: &str) -> &str {
    block.split('\n').next().unwrap_or_default()
}

fn should_join_with_single_newline(prev: &str, next: &str) -> bool {
    is_list_line(first_line(prev)) && is_list_line(first_line(next))
}

/// Join rendered blocks: blank lines between blocks, single newlines between
/// list-looking neighbours, then collapse runs of 3+ newlines and trim.
pub fn merge_blocks(blocks: Vec<String>, rules: &MarkdownRules) -> String {
    let mut merged: Vec<String> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if rules.join_list_lines {
            if let Some(last) = merged.last_mut() {
                if should_join_with_single_newline(last, &block) {
                    last.push('\n');
                    last.push_str(&block);
                    continue;
                }
            }
        }
        merged.push(block);
    }

    let joined = merged.join("\n\n");
    EXCESS_NEWLINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}
