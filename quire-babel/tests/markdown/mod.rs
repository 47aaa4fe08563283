//! Markdown format tests
//!
//! Export of every block kind, paragraph-only import, and the
//! export → import → export fixed point.

mod export;
mod import;
mod roundtrip;
