//! Inline mark serialization.
//!
//! Marks on one run compose in a fixed order: code is applied first
//! (innermost), then bold, then italic, and a link wraps everything.

use crate::ir::nodes::{Block, Inline, Mark, Text};

/// Render inline content as markdown. Hard breaks become newlines.
pub fn render_inline(content: &[Inline]) -> String {
    let mut output = String::new();
    for inline in content {
        push_rendered(inline, &mut output);
    }
    output
}

/// Render every inline node below `block`, in document order.
pub fn render_block_inline(block: &Block) -> String {
    let mut output = String::new();
    block.walk_inlines(&mut |inline| push_rendered(inline, &mut output));
    output
}

/// Raw text of inline content with marks ignored. Used where emphasis syntax
/// must not appear, such as code blocks.
pub fn extract_plain_text(content: &[Inline]) -> String {
    let mut output = String::new();
    for inline in content {
        push_plain(inline, &mut output);
    }
    output
}

/// Raw text of every inline node below `block`.
pub fn extract_block_plain_text(block: &Block) -> String {
    let mut output = String::new();
    block.walk_inlines(&mut |inline| push_plain(inline, &mut output));
    output
}

fn push_rendered(inline: &Inline, output: &mut String) {
    match inline {
        Inline::HardBreak => output.push('\n'),
        Inline::Text(run) => output.push_str(&apply_marks(run)),
    }
}

fn push_plain(inline: &Inline, output: &mut String) {
    match inline {
        Inline::HardBreak => output.push('\n'),
        Inline::Text(run) => output.push_str(&run.text),
    }
}

/// Wrap a run's text in the syntax of its marks.
pub fn apply_marks(run: &Text) -> String {
    if run.text.is_empty() {
        return String::new();
    }

    let mut output = run.text.clone();
    if run.has(&Mark::Code) {
        output = format!("`{}`", output.replace('`', "\\`"));
    }
    if run.has(&Mark::Bold) {
        output = format!("**{output}**");
    }
    if run.has(&Mark::Italic) {
        output = format!("*{output}*");
    }
    if let Some(href) = run.link_href() {
        output = format!("[{output}]({href})");
    }
    output
}
