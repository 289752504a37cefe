//! Playprint writer.
//!
//! - [`PlayprintSink`] - append-only, length-framed binary output
//! - [`ReferenceTable`] - sorted external assets, resolved to indices
//! - [`ItemTree`] - typed fields per authored node, written in pre-order
//! - [`compile`] - the whole pass, with collect-and-continue diagnostics
//! - [`FieldReader`] - reads fields back for tooling and tests

mod compile;
mod item;
mod reader;
mod refs;
mod sink;

pub use compile::{compile, compile_with_registry, CompileOptions, Diagnostic, Playprint};
pub use item::{Field, ItemTree, PlayprintItem};
pub use reader::FieldReader;
pub use refs::{AssetRef, ReferenceTable};
pub use sink::{Endian, PlayprintSink};
