//! Text lookups over flat positions.

use super::commands::TextRange;
use crate::ir::nodes::{Document, Inline};
use tracing::debug;

/// First occurrence of `needle` (trimmed) inside a single text run.
///
/// Matches never span two runs or a hard break. An empty needle finds nothing.
pub fn find_text(doc: &Document, needle: &str) -> Option<TextRange> {
    let wanted = needle.trim();
    if wanted.is_empty() {
        return None;
    }

    let mut base = 0;
    for block in &doc.children {
        let mut local = 0;
        let mut found = None;
        block.walk_inlines(&mut |inline| {
            if found.is_some() {
                return;
            }
            if let Inline::Text(run) = inline {
                if let Some(byte) = run.text.find(wanted) {
                    let from = base + local + run.text[..byte].chars().count();
                    found = Some(TextRange::new(from, from + wanted.chars().count()));
                }
            }
            local += inline.text_len();
        });
        if found.is_some() {
            return found;
        }
        base += local;
    }
    None
}

/// Locate a heading by the text a reader saw.
///
/// Tries `needle`, then the title written as a markdown heading at every
/// level (`# title` … `###### title`), then the bare title. The first
/// candidate that occurs wins. An empty title finds nothing.
pub fn find_heading(doc: &Document, needle: &str, title: &str) -> Option<TextRange> {
    let candidates = heading_candidates(needle, title);
    let hit = candidates
        .iter()
        .find_map(|candidate| find_text(doc, candidate));
    if hit.is_none() {
        debug!(title, "heading not found");
    }
    hit
}

fn heading_candidates(needle: &str, title: &str) -> Vec<String> {
    let title = title.trim();
    if title.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };
    let needle = needle.trim();
    if !needle.is_empty() {
        push(needle.to_string());
    }
    for level in 1..=6 {
        push(format!("{} {title}", "#".repeat(level)));
    }
    push(title.to_string());
    candidates
}
