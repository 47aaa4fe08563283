//! Format-agnostic helpers.
//!
//! `locator` maps flat offsets onto ordered text segments; both the edit
//! commands and range lookups resolve positions through it. `text` holds the
//! plain-text normalization and paragraph chunking that the importer and the
//! edit commands share.

pub mod locator;
pub mod text;

pub use locator::{locate, locate_signed, TextOffset};
