//! Document tree model.
//!
//! `nodes` holds the typed tree every component works on; `json` is the
//! boundary codec for the node-tree form the persistence layer stores.

pub mod json;
pub mod nodes;
