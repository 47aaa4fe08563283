//! Nested list rendering.
//!
//! Each call receives its [`ListContext`] by value and numbers its own items,
//! so nested lists restart at 1 and no counter leaks between levels.

use super::rules::MarkdownRules;
use super::serializer::render_block;
use crate::ir::nodes::{ListItem, ListKind};

/// Nesting state for one list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    pub kind: ListKind,
    pub depth: usize,
    pub next_index: usize,
}

impl ListContext {
    /// Context for a list at `depth`, numbered from 1.
    pub fn new(kind: ListKind, depth: usize) -> Self {
        ListContext {
            kind,
            depth,
            next_index: 1,
        }
    }

    /// Context for a list nested one level below this one.
    pub fn nested(&self, kind: ListKind) -> Self {
        ListContext::new(kind, self.depth + 1)
    }

    /// Marker for the item numbered `next_index`, including its indentation.
    pub fn prefix(&self, rules: &MarkdownRules) -> String {
        let indent = " ".repeat(rules.list_indent * self.depth);
        match self.kind {
            ListKind::Ordered => format!("{indent}{}. ", self.next_index),
            ListKind::Bullet => format!("{indent}- "),
        }
    }

    /// Indentation that aligns continuation lines under the marker's text.
    pub fn continuation(&self, rules: &MarkdownRules) -> String {
        " ".repeat(self.prefix(rules).chars().count())
    }
}

/// Render the items of one list into markdown lines.
///
/// Items that produce no lines are skipped and do not consume a number.
pub fn render_list(items: &[ListItem], context: ListContext, rules: &MarkdownRules) -> Vec<String> {
    let mut lines = Vec::new();
    let mut next_index = context.next_index;

    for item in items {
        let item_context = ListContext {
            next_index,
            ..context
        };
        let item_lines = render_item(item, item_context, rules);
        if item_lines.is_empty() {
            continue;
        }
        lines.extend(item_lines);
        next_index += 1;
    }

    lines
}

fn render_item(item: &ListItem, context: ListContext, rules: &MarkdownRules) -> Vec<String> {
    let prefix = context.prefix(rules);
    let continuation = context.continuation(rules);
    let mut lines = Vec::new();
    let mut wrote_marker = false;

    for child in &item.children {
        if let Some((kind, nested_items)) = child.as_list() {
            let nested = render_list(nested_items, context.nested(kind), rules);
            if !nested.is_empty() {
                lines.push(nested.join("\n"));
            }
            continue;
        }

        let Some(block) = render_block(child, rules) else {
            continue;
        };
        for line in block.split('\n') {
            if wrote_marker {
                lines.push(format!("{continuation}{line}"));
            } else {
                lines.push(format!("{prefix}{line}"));
                wrote_marker = true;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Block, Inline};

    fn item(text: &str) -> ListItem {
        ListItem::new(vec![Block::paragraph(vec![Inline::text(text)])])
    }

    fn rules() -> MarkdownRules {
        MarkdownRules::default()
    }

    #[test]
    fn bullet_items_get_dash_markers() {
        let lines = render_list(
            &[item("001"), item("ok?")],
            ListContext::new(ListKind::Bullet, 0),
            &rules(),
        );
        assert_eq!(lines, vec!["- 001", "- ok?"]);
    }

    #[test]
    fn ordered_items_are_numbered_and_empty_items_skip_numbers() {
        let lines = render_list(
            &[item("a"), ListItem::default(), item("b")],
            ListContext::new(ListKind::Ordered, 0),
            &rules(),
        );
        assert_eq!(lines, vec!["1. a", "2. b"]);
    }

    #[test]
    fn nested_lists_indent_and_restart_numbering() {
        let nested = Block::ordered_list(vec![item("x"), item("y")]);
        let items = vec![
            ListItem::new(vec![Block::paragraph(vec![Inline::text("outer")]), nested]),
            item("after"),
        ];
        let lines = render_list(&items, ListContext::new(ListKind::Ordered, 0), &rules());
        assert_eq!(lines.join("\n"), "1. outer\n  1. x\n  2. y\n2. after");
    }

    #[test]
    fn continuation_lines_align_under_marker_text() {
        let items = vec![
            ListItem::new(vec![
                Block::paragraph(vec![Inline::text("a"), Inline::HardBreak, Inline::text("b")]),
                Block::paragraph(vec![Inline::text("c")]),
            ]),
        ];
        let lines = render_list(&items, ListContext::new(ListKind::Ordered, 1), &rules());
        assert_eq!(lines, vec!["  1. a", "     b", "     c"]);
    }

    #[test]
    fn custom_indent_width() {
        let nested = Block::bullet_list(vec![item("in")]);
        let items = vec![ListItem::new(vec![Block::paragraph(vec![Inline::text("out")]), nested])];
        let rules = MarkdownRules {
            list_indent: 4,
            ..MarkdownRules::default()
        };
        let lines = render_list(&items, ListContext::new(ListKind::Bullet, 0), &rules);
        assert_eq!(lines.join("\n"), "- out\n    - in");
    }

    #[test]
    fn nested_list_first_does_not_take_the_marker() {
        let nested = Block::bullet_list(vec![item("deep")]);
        let items = vec![ListItem::new(vec![nested, Block::paragraph(vec![Inline::text("tail")])])];
        let lines = render_list(&items, ListContext::new(ListKind::Bullet, 0), &rules());
        assert_eq!(lines, vec!["  - deep", "- tail"]);
    }
}
