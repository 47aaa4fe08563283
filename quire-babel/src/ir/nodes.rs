//! Core data structures for the document tree.
//!
//! The tree is a closed set of block and inline kinds. Every consumer
//! (exporter, list renderer, JSON codec, edit commands) matches on these
//! exhaustively, so adding a kind is a compile-time-checked change.

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Block>,
}

impl Document {
    pub fn new(children: Vec<Block>) -> Self {
        Document { children }
    }

    /// Document holding a single empty paragraph, the shape of a blank editor.
    pub fn blank() -> Self {
        Document {
            children: vec![Block::Paragraph(Vec::new())],
        }
    }

    /// Flat length of each top-level block, in characters.
    ///
    /// These are the segments edit positions are resolved against.
    pub fn segment_lengths(&self) -> Vec<usize> {
        self.children.iter().map(Block::text_len).collect()
    }

    /// Total flat length of the document.
    pub fn text_len(&self) -> usize {
        self.children.iter().map(Block::text_len).sum()
    }
}

/// Heading level, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Clamp `level` into the valid range.
    pub fn new(level: u8) -> Self {
        HeadingLevel(level.clamp(Self::MIN, Self::MAX))
    }

    /// Accept `level` only if it is already in range.
    pub fn try_new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(HeadingLevel(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        HeadingLevel(Self::MIN)
    }
}

/// A structural unit of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading {
        level: HeadingLevel,
        content: Vec<Inline>,
    },
    CodeBlock(Vec<Inline>),
    Blockquote(Vec<Block>),
    BulletList(Vec<ListItem>),
    OrderedList(Vec<ListItem>),
    HorizontalRule,
}

/// Whether a list renders with bullets or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

impl Block {
    /// Paragraph from inline content, dropping empty text runs.
    pub fn paragraph(content: impl IntoIterator<Item = Inline>) -> Self {
        Block::Paragraph(retain_inlines(content))
    }

    pub fn heading(level: u8, content: impl IntoIterator<Item = Inline>) -> Self {
        Block::Heading {
            level: HeadingLevel::new(level),
            content: retain_inlines(content),
        }
    }

    pub fn code_block(content: impl IntoIterator<Item = Inline>) -> Self {
        Block::CodeBlock(retain_inlines(content))
    }

    pub fn bullet_list(items: impl IntoIterator<Item = ListItem>) -> Self {
        Block::BulletList(items.into_iter().collect())
    }

    pub fn ordered_list(items: impl IntoIterator<Item = ListItem>) -> Self {
        Block::OrderedList(items.into_iter().collect())
    }

    /// Inline content of text blocks (paragraph, heading, code block).
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Paragraph(content) | Block::CodeBlock(content) => Some(content),
            Block::Heading { content, .. } => Some(content),
            Block::Blockquote(_)
            | Block::BulletList(_)
            | Block::OrderedList(_)
            | Block::HorizontalRule => None,
        }
    }

    /// The list kind and items, if this block is a list.
    pub fn as_list(&self) -> Option<(ListKind, &[ListItem])> {
        match self {
            Block::BulletList(items) => Some((ListKind::Bullet, items)),
            Block::OrderedList(items) => Some((ListKind::Ordered, items)),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }

    /// Text blocks hold inline content directly and can be split by edits.
    pub fn is_textblock(&self) -> bool {
        self.inlines().is_some()
    }

    /// Rebuild this text block's kind around new inline content.
    ///
    /// Returns `None` for container blocks.
    pub fn with_inlines(&self, content: Vec<Inline>) -> Option<Block> {
        match self {
            Block::Paragraph(_) => Some(Block::Paragraph(content)),
            Block::CodeBlock(_) => Some(Block::CodeBlock(content)),
            Block::Heading { level, .. } => Some(Block::Heading {
                level: *level,
                content,
            }),
            Block::Blockquote(_)
            | Block::BulletList(_)
            | Block::OrderedList(_)
            | Block::HorizontalRule => None,
        }
    }

    /// Visit every inline node below this block, depth-first.
    pub fn walk_inlines<'a>(&'a self, visit: &mut impl FnMut(&'a Inline)) {
        match self {
            Block::Paragraph(content) | Block::CodeBlock(content) => {
                content.iter().for_each(&mut *visit)
            }
            Block::Heading { content, .. } => content.iter().for_each(&mut *visit),
            Block::Blockquote(children) => {
                for child in children {
                    child.walk_inlines(visit);
                }
            }
            Block::BulletList(items) | Block::OrderedList(items) => {
                for item in items {
                    for child in &item.children {
                        child.walk_inlines(visit);
                    }
                }
            }
            Block::HorizontalRule => {}
        }
    }

    /// Flat length in characters: text runs count their chars, hard breaks count one.
    pub fn text_len(&self) -> usize {
        let mut len = 0;
        self.walk_inlines(&mut |inline| len += inline.text_len());
        len
    }
}

/// Represents an item in a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    pub children: Vec<Block>,
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        ListItem { children }
    }
}

/// An inline formatting annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Link { href: String },
}

/// A run of text with its marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Text {
    pub fn has(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    /// Href of the first link mark, if any.
    pub fn link_href(&self) -> Option<&str> {
        self.marks.iter().find_map(|mark| match mark {
            Mark::Link { href } => Some(href.as_str()),
            _ => None,
        })
    }
}

/// Inline content of a text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(Text),
    HardBreak,
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(Text {
            text: text.into(),
            marks: Vec::new(),
        })
    }

    /// Text run carrying `marks`. Duplicate marks are collapsed.
    pub fn marked(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        let mut unique: Vec<Mark> = Vec::new();
        for mark in marks {
            if !unique.contains(&mark) {
                unique.push(mark);
            }
        }
        Inline::Text(Text {
            text: text.into(),
            marks: unique,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Inline::Text(run) if run.text.is_empty())
    }

    pub fn text_len(&self) -> usize {
        match self {
            Inline::Text(run) => run.text.chars().count(),
            Inline::HardBreak => 1,
        }
    }
}

/// Collect inline content, dropping empty text runs.
pub fn retain_inlines(content: impl IntoIterator<Item = Inline>) -> Vec<Inline> {
    content
        .into_iter()
        .filter(|inline| !inline.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_level_is_clamped() {
        assert_eq!(HeadingLevel::new(0).get(), 1);
        assert_eq!(HeadingLevel::new(9).get(), 6);
        assert_eq!(HeadingLevel::try_new(7), None);
        assert_eq!(HeadingLevel::try_new(3).map(HeadingLevel::get), Some(3));
    }

    #[test]
    fn constructors_drop_empty_runs() {
        let block = Block::paragraph(vec![
            Inline::text(""),
            Inline::text("a"),
            Inline::HardBreak,
        ]);
        assert_eq!(block, Block::Paragraph(vec![Inline::text("a"), Inline::HardBreak]));
    }

    #[test]
    fn text_len_counts_chars_and_breaks() {
        let block = Block::paragraph(vec![
            Inline::text("héllo"),
            Inline::HardBreak,
            Inline::marked("wo", [Mark::Bold]),
        ]);
        assert_eq!(block.text_len(), 8);
        assert_eq!(Block::HorizontalRule.text_len(), 0);
    }

    #[test]
    fn text_len_walks_nested_containers() {
        let list = Block::bullet_list(vec![
            ListItem::new(vec![Block::paragraph(vec![Inline::text("abc")])]),
            ListItem::new(vec![Block::Blockquote(vec![Block::paragraph(vec![
                Inline::text("de"),
            ])])]),
        ]);
        assert_eq!(list.text_len(), 5);
        let doc = Document::new(vec![list, Block::paragraph(vec![Inline::text("xy")])]);
        assert_eq!(doc.segment_lengths(), vec![5, 2]);
        assert_eq!(doc.text_len(), 7);
    }

    #[test]
    fn marked_collapses_duplicates() {
        let inline = Inline::marked("x", [Mark::Bold, Mark::Bold, Mark::Code]);
        match inline {
            Inline::Text(run) => assert_eq!(run.marks, vec![Mark::Bold, Mark::Code]),
            Inline::HardBreak => panic!("expected text"),
        }
    }

    #[test]
    fn with_inlines_keeps_heading_level() {
        let heading = Block::heading(3, vec![Inline::text("t")]);
        let rebuilt = heading.with_inlines(vec![Inline::text("u")]);
        assert_eq!(rebuilt, Some(Block::heading(3, vec![Inline::text("u")])));
        assert_eq!(Block::HorizontalRule.with_inlines(vec![]), None);
    }
}
