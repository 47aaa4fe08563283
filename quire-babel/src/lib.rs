//! Rich-document ⇄ markdown conversion and structural edits
//!
//!     This crate converts a rich document tree (blocks, inline runs, formatting marks) to a
//!     plain markdown dialect and back, and edits that tree with undoable paragraph commands.
//!
//!     TLDR:
//!         - The tree in ./ir/nodes.rs is the source of truth. Markdown is a view of it.
//!         - Export is rich (headings, lists, quotes, code, marks). Import is paragraph-only on purpose.
//!         - Edits address the tree through flat character positions, see ./edit/position.rs.
//!         - Every edit command is one undo step.
//!
//! Architecture
//!
//!     This is a pure lib: it powers quire-cli but makes no shell assumptions (no printing,
//!     no env vars). Logging goes through `tracing`; the binary decides where it ends up.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # export (serializer, list, inline) and import (parser)
//!     │   └── json                # persisted node tree
//!     ├── edit                    # Editor, history, position resolution, lookups
//!     ├── lib.rs
//!     ├── ir                      # Node model and its JSON codec
//!     └── common                  # Offset locator and plain-text chunking
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # declares the submodules below
//!     ├── markdown                # export, import, round trip
//!     ├── edit.rs
//!     └── json.rs
//!
//!     Rust does not discover tests in subdirectories by default, so they are declared from
//!     tests/lib.rs.
//!
//! Core Algorithms
//!
//!     Export walks the top-level blocks and renders each to a markdown block, delegating
//!     lists to a recursive renderer that carries its own numbering context. A separate
//!     textual pass then joins blocks whose first lines both look like list items, so
//!     paragraphs typed as `- item` stay grouped with real lists.
//!
//!     Edits resolve a flat position to a (block, offset) pair with the locator in
//!     ./common/locator.rs, split the text block there, and splice paragraphs between the
//!     halves. Container blocks are never split.
//!
//! Lossy Conversions
//!
//!     export → import → export is a fixed point for paragraph content. Everything else comes
//!     back as paragraphs of literal markdown, which export to the same text again.
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod edit;
pub mod ir;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;

use ir::nodes::Document;

/// Export a document to markdown with the default rules.
pub fn to_markdown(doc: &Document) -> String {
    formats::markdown::serializer::serialize_to_markdown(doc)
}

/// Import markdown text as a paragraph-only document.
pub fn from_markdown(source: &str) -> Document {
    formats::markdown::parser::parse_from_markdown(source)
}
