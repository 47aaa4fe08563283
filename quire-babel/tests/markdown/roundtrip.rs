//! export → import → export reaches a fixed point for paragraph content.

use proptest::prelude::*;
use quire_babel::ir::nodes::{Block, Document, Inline, ListItem};
use quire_babel::{from_markdown, to_markdown};

/// Lines start with a visible character; a leading blank line in the first
/// block would be trimmed away and change how the next block merges.
fn line() -> impl Strategy<Value = String> {
    "[a-z#*0-9.\\-][a-z#*0-9.\\- ]{0,11}"
}

fn paragraph() -> impl Strategy<Value = Block> {
    prop::collection::vec(line(), 1..4).prop_map(|lines| {
        let mut content = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            if index > 0 {
                content.push(Inline::HardBreak);
            }
            content.push(Inline::text(line));
        }
        Block::paragraph(content)
    })
}

proptest! {
    #[test]
    fn export_import_export_is_stable(blocks in prop::collection::vec(paragraph(), 0..6)) {
        let first = to_markdown(&Document::new(blocks));
        let second = to_markdown(&from_markdown(&first));
        prop_assert_eq!(&second, &first);
    }
}

#[test]
fn test_rich_content_settles_after_one_pass() {
    let doc = Document::new(vec![
        Block::heading(3, vec![Inline::text("Plan")]),
        Block::bullet_list(vec![ListItem::new(vec![
            Block::paragraph(vec![Inline::text("step")]),
        ])]),
        Block::paragraph(vec![Inline::text("1.done")]),
    ]);
    let first = to_markdown(&doc);
    assert_eq!(first, "### Plan\n\n- step\n1. done");
    assert_eq!(to_markdown(&from_markdown(&first)), first);
}
