//! Data type handlers and typed field values.
//!
//! - [`DataKind`] - closed set of handlers, each with a unique name and layout
//! - [`TaggedValue`] - a value slot whose variant selects its handler
//! - [`DataArray`] - owned arrays backing the int-array and float-array kinds
//! - [`TypeRegistry`] - name -> handler lookup

mod array;
mod kind;
mod registry;
mod value;

pub use array::*;
pub use kind::*;
pub use registry::*;
pub use value::*;
