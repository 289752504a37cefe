//! Authored scene tree ("workprint") consumed by the compiler.
//!
//! The workprint text grammar is handled elsewhere; this module holds the
//! in-memory tree it produces and a JSON interchange form for tooling.

mod load;
mod tree;

pub use tree::*;
