//! Structural edits over the document tree.
//!
//! Positions are flat character offsets across top-level blocks; see
//! [`position`] for how they resolve. All mutation goes through [`Editor`],
//! which records each command as one undoable transaction.

pub mod commands;
pub mod history;
pub mod position;
pub mod search;

pub use commands::{ApplyMode, ApplyRequest, Editor, InsertedRange, Selection, TextRange};
pub use history::{EditOperation, History, Transaction, UndoManager, DEFAULT_MAX_STEPS};
pub use search::{find_heading, find_text};
