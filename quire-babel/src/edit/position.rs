//! Resolving flat positions against the block tree.
//!
//! A flat position counts characters across the document's top-level blocks
//! (hard breaks count one, rules count zero). Text blocks can be split at any
//! position inside them; container blocks cannot, so a position inside one
//! snaps to its start (offset 0) or its end (anything else).

use crate::common::locator::{locate, TextOffset};
use crate::ir::nodes::{Block, Document, Inline, Text};

/// A block split in two at a position. Empty halves are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCut {
    /// Index of the block the position fell into.
    pub index: usize,
    pub head: Option<Block>,
    pub tail: Option<Block>,
}

/// Resolve `pos` to the block it falls into and split that block there.
///
/// Returns `None` for a document without blocks.
pub fn cut_at(doc: &Document, pos: usize) -> Option<BlockCut> {
    let TextOffset {
        segment_index,
        local_offset,
    } = locate(&doc.segment_lengths(), pos)?;
    let block = doc.children.get(segment_index)?;
    let (head, tail) = split_block(block, local_offset);
    Some(BlockCut {
        index: segment_index,
        head,
        tail,
    })
}

/// Flat position where block `index` starts.
pub fn block_start(doc: &Document, index: usize) -> usize {
    doc.children.iter().take(index).map(Block::text_len).sum()
}

/// Split `block` at `offset` characters into its flat text.
pub fn split_block(block: &Block, offset: usize) -> (Option<Block>, Option<Block>) {
    match block.inlines() {
        Some(content) if block.text_len() > 0 => {
            let (head, tail) = split_inlines(content, offset);
            let rebuild = |content: Vec<Inline>| {
                if content.is_empty() {
                    None
                } else {
                    block.with_inlines(content)
                }
            };
            (rebuild(head), rebuild(tail))
        }
        _ if offset == 0 => (None, Some(block.clone())),
        _ => (Some(block.clone()), None),
    }
}

/// Split inline content at a character offset. A text run straddling the
/// offset is cut in two, both halves keeping its marks.
pub fn split_inlines(content: &[Inline], offset: usize) -> (Vec<Inline>, Vec<Inline>) {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    let mut remaining = offset;

    for inline in content {
        let len = inline.text_len();
        if remaining >= len {
            head.push(inline.clone());
            remaining -= len;
        } else if remaining == 0 {
            tail.push(inline.clone());
        } else {
            // Only text runs are longer than one character.
            if let Inline::Text(run) = inline {
                let at = run
                    .text
                    .char_indices()
                    .nth(remaining)
                    .map_or(run.text.len(), |(byte, _)| byte);
                let (left, right) = run.text.split_at(at);
                head.push(with_text(run, left));
                tail.push(with_text(run, right));
            }
            remaining = 0;
        }
    }

    (head, tail)
}

fn with_text(run: &Text, text: &str) -> Inline {
    Inline::Text(Text {
        text: text.to_string(),
        marks: run.marks.clone(),
    })
}
