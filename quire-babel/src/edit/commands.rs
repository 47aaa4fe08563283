//! Structural edit commands.
//!
//! [`Editor`] owns a document, its undo history and a selection. Every command
//! turns plain text into paragraphs, splices them into the tree as a single
//! transaction and reports the inserted range in the resulting document. Text
//! that is empty after normalization leaves the editor untouched.

use super::history::{History, Transaction, UndoManager};
use super::position::{block_start, cut_at};
use super::search::find_heading;
use crate::common::text::plain_text_to_paragraphs;
use crate::ir::nodes::{Block, Document};
use tracing::debug;

/// A half-open range of flat positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

/// Range covered by the blocks a command inserted.
pub type InsertedRange = TextRange;

impl TextRange {
    pub fn new(from: usize, to: usize) -> Self {
        TextRange { from, to }
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Clamp both ends into `0..=max`; `None` if nothing is left.
    pub fn clamp(self, max: usize) -> Option<TextRange> {
        let from = self.from.min(max);
        let to = self.to.min(max);
        (from < to).then_some(TextRange { from, to })
    }
}

/// The editor's selection. `from == to` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

impl Selection {
    pub fn new(from: usize, to: usize) -> Self {
        Selection { from, to }
    }

    pub fn collapsed(pos: usize) -> Self {
        Selection { from: pos, to: pos }
    }

    pub fn is_collapsed(&self) -> bool {
        self.from == self.to
    }

    /// Clamp into `0..=max`, keeping `to >= from`.
    pub fn clamped(self, max: usize) -> Self {
        let from = self.from.min(max);
        let to = self.to.max(from).min(max);
        Selection { from, to }
    }
}

/// How an [`ApplyRequest`] lands in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Replace the selected range.
    Replace,
    /// Insert after the selection, optionally separated by an empty paragraph.
    Insert { leading_blank_line: bool },
}

/// Text produced elsewhere, to be applied against a captured selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    pub mode: ApplyMode,
    pub selection: Selection,
    pub text: String,
}

/// An editing session over one document.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    history: History,
    selection: Selection,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Document::blank())
    }
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            history: History::default(),
            selection: Selection::default(),
        }
    }

    /// Editor keeping at most `max_steps` undo steps.
    pub fn with_history_limit(document: Document, max_steps: usize) -> Self {
        Self {
            document,
            history: History::new(max_steps),
            selection: Selection::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Select `from..to`, clamped to the document.
    pub fn select(&mut self, from: usize, to: usize) -> Selection {
        self.selection = Selection::new(from, to).clamped(self.document.text_len());
        self.selection
    }

    /// Put the caret at the start of a heading located with [`find_heading`].
    ///
    /// Returns `false`, leaving the selection alone, when nothing matches.
    pub fn select_heading(&mut self, needle: &str, title: &str) -> bool {
        match find_heading(&self.document, needle, title) {
            Some(range) => {
                self.select(range.from, range.from);
                true
            }
            None => false,
        }
    }

    /// Insert `text` as paragraphs at `pos`.
    pub fn insert_paragraphs(&mut self, pos: usize, text: &str) -> Option<InsertedRange> {
        let paragraphs = plain_text_to_paragraphs(text);
        self.splice_paragraphs(pos, pos, paragraphs)
    }

    /// Insert `text` as paragraphs at `pos`, preceded by one empty paragraph.
    pub fn insert_paragraphs_with_leading_blank_line(
        &mut self,
        pos: usize,
        text: &str,
    ) -> Option<InsertedRange> {
        let mut paragraphs = plain_text_to_paragraphs(text);
        if !paragraphs.is_empty() {
            paragraphs.insert(0, Block::Paragraph(Vec::new()));
        }
        self.splice_paragraphs(pos, pos, paragraphs)
    }

    /// Replace `from..to` with `text` as paragraphs. A reversed range is
    /// treated as empty at `from`.
    pub fn replace_range(&mut self, from: usize, to: usize, text: &str) -> Option<InsertedRange> {
        let paragraphs = plain_text_to_paragraphs(text);
        self.splice_paragraphs(from, to.max(from), paragraphs)
    }

    /// Insert `text` as paragraphs at the end of the current selection.
    pub fn insert_at_selection(&mut self, text: &str) -> Option<InsertedRange> {
        self.insert_paragraphs(self.selection.to, text)
    }

    /// Run an [`ApplyRequest`] through the matching command.
    pub fn apply(&mut self, request: &ApplyRequest) -> Option<InsertedRange> {
        let ApplyRequest {
            mode,
            selection,
            text,
        } = request;
        match mode {
            ApplyMode::Replace => self.replace_range(selection.from, selection.to, text),
            ApplyMode::Insert {
                leading_blank_line: true,
            } => self.insert_paragraphs_with_leading_blank_line(selection.to, text),
            ApplyMode::Insert {
                leading_blank_line: false,
            } => self.insert_paragraphs(selection.to, text),
        }
    }

    fn splice_paragraphs(
        &mut self,
        from: usize,
        to: usize,
        paragraphs: Vec<Block>,
    ) -> Option<InsertedRange> {
        if paragraphs.is_empty() {
            debug!(from, to, "nothing to insert after normalization");
            return None;
        }

        let (index, count, head, tail) =
            match (cut_at(&self.document, from), cut_at(&self.document, to)) {
                (Some(start), Some(end)) => (
                    start.index,
                    (end.index + 1).saturating_sub(start.index),
                    start.head,
                    end.tail,
                ),
                _ => (self.document.children.len(), 0, None, None),
            };

        let start = block_start(&self.document, index) + head.as_ref().map_or(0, Block::text_len);
        let inserted_len: usize = paragraphs.iter().map(Block::text_len).sum();
        let range = InsertedRange::new(start, start + inserted_len);

        let mut inserted = Vec::with_capacity(paragraphs.len() + 2);
        inserted.extend(head);
        inserted.extend(paragraphs);
        inserted.extend(tail);

        let mut transaction = Transaction::new();
        transaction.replace(&mut self.document.children, index, count, inserted);
        self.history.record(transaction);
        self.selection = Selection::collapsed(range.to);

        debug!(
            index,
            replaced = count,
            from = range.from,
            to = range.to,
            "applied paragraph edit"
        );
        Some(range)
    }

    fn clamp_selection(&mut self) {
        self.selection = self.selection.clamped(self.document.text_len());
    }
}

impl UndoManager for Editor {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document.children);
        self.clamp_selection();
        undone
    }

    fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document.children);
        self.clamp_selection();
        redone
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}
