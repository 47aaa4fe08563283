//! Markdown format implementation
//!
//! Converts between the document tree and a plain markdown dialect.
//!
//! # Element Mapping Table
//!
//! | Tree Element     | Markdown Export                 | Import                     |
//! |------------------|---------------------------------|----------------------------|
//! | Paragraph        | Normalized inline text          | Blank-line separated chunk |
//! | Heading          | `#` × level + space + text      | Not reconstructed          |
//! | CodeBlock        | Fenced with ```, raw text       | Not reconstructed          |
//! | Blockquote       | Every line prefixed with `> `   | Not reconstructed          |
//! | BulletList       | `- ` items, 2 spaces per level  | Not reconstructed          |
//! | OrderedList      | `N. ` items, renumbered from 1  | Not reconstructed          |
//! | HorizontalRule   | `---`                           | Not reconstructed          |
//! | HardBreak        | Newline                         | Single newline             |
//! | Marks:           |                                 |                            |
//! |   Code           | `` `text` `` (backticks escaped)| Literal                    |
//! |   Bold           | `**text**`                      | Literal                    |
//! |   Italic         | `*text*`                        | Literal                    |
//! |   Link           | `[text](href)`                  | Literal                    |
//!
//! # Lossy Conversions
//!
//! Export then import keeps every character of paragraph-only documents, and a
//! second export is identical to the first. Anything richer comes back as
//! paragraphs of literal markdown.
//!
//! We do not use a CommonMark library here: the export has to reproduce a
//! specific set of textual heuristics (marker repair, list-line grouping)
//! exactly, and the import intentionally does no markdown parsing at all.

pub mod inline;
pub mod list;
pub mod parser;
pub mod rules;
pub mod serializer;

pub use rules::MarkdownRules;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Plain markdown (paragraph-level import)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let rules = MarkdownRules::from_options(options)?;
        Ok(serializer::serialize_with_rules(doc, &rules))
    }
}
