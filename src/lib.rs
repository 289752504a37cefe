//! # Playprint
//!
//! Compiles an authored scene tree ("workprint") into a compact binary
//! runtime record ("playprint") for a game-engine loader.
//!
//! Every authored node becomes one playprint item. Item fields are typed by
//! named data type handlers and written as length-framed records in
//! depth-first pre-order. External asset references are written as indices
//! into a name-sorted reference table.
//!
//! ## Modules
//!
//! - [`util`] - Errors, scalar formats and fixed-point codec, math types
//! - [`types`] - Data type handlers, tagged values, type registry
//! - [`workprint`] - Authored tree arena and JSON interchange
//! - [`playprint`] - Output sink, reference table, item tree, compile pass
//!
//! ## Example
//!
//! ```ignore
//! use playprint::prelude::*;
//!
//! let workprint = Workprint::from_json_file("scene.json")?;
//! let refs = ReferenceTable::from_json_file("assets.json")?;
//! let options = CompileOptions::new().with_scalar_format(ScalarFormat::Fixed16_16);
//!
//! let out = compile(&workprint, &refs, &options)?;
//! for d in out.diagnostics() {
//!     eprintln!("{d}");
//! }
//! out.write_to("scene.bpp")?;
//! ```

pub mod util;
pub mod types;
pub mod workprint;
pub mod playprint;

// Re-export commonly used types
pub use util::{Error, Result, ScalarFormat};
pub use playprint::{compile, CompileOptions, Playprint};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, ScalarFormat};
    pub use crate::types::{DataKind, MediaRef, TaggedValue, TypeRegistry};
    pub use crate::workprint::{AttrValue, NodeId, Workprint};
    pub use crate::playprint::{
        compile, compile_with_registry, AssetRef, CompileOptions, Endian, Playprint,
        ReferenceTable,
    };
}
