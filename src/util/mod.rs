//! Utility types and functions for the playprint compiler.
//!
//! This module contains fundamental types used throughout the library:
//! - [`ScalarFormat`] and the fixed-point codec
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam plus [`Mat43`]

mod error;
mod math;
mod scalar;

pub use error::*;
pub use math::*;
pub use scalar::*;
