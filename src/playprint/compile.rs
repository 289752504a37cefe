//! Compile entry point: workprint + reference table -> playprint bytes.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::item::ItemTree;
use super::refs::ReferenceTable;
use super::sink::{Endian, PlayprintSink};
use crate::types::TypeRegistry;
use crate::util::{Error, Result, ScalarFormat};
use crate::workprint::Workprint;

/// Settings fixed for one compile pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    scalar_format: ScalarFormat,
    byte_order: Endian,
    size_limit: Option<usize>,
}

impl CompileOptions {
    /// Floating scalars, little-endian, no size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoding of format-aware vector components.
    pub fn with_scalar_format(mut self, format: ScalarFormat) -> Self {
        self.scalar_format = format;
        self
    }

    /// Set the byte order of every primitive.
    pub fn with_byte_order(mut self, endian: Endian) -> Self {
        self.byte_order = endian;
        self
    }

    /// Cap the playprint size; writes past it fail as sink errors.
    pub fn with_size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    /// Get scalar format.
    pub fn scalar_format(&self) -> ScalarFormat {
        self.scalar_format
    }

    /// Get byte order.
    pub fn byte_order(&self) -> Endian {
        self.byte_order
    }

    /// Get size limit.
    pub fn size_limit(&self) -> Option<usize> {
        self.size_limit
    }
}

/// A field that could not be written.
#[derive(Debug)]
pub struct Diagnostic {
    /// Path of the authored node owning the field.
    pub path: String,
    /// Field name.
    pub field: String,
    /// Why the write failed.
    pub error: Error,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.path, self.field, self.error)
    }
}

/// Output of one compile pass.
///
/// Data and reference failures do not stop the pass; they are collected here
/// and the caller decides whether any of them makes the compile fail.
#[derive(Debug)]
pub struct Playprint {
    bytes: Vec<u8>,
    diagnostics: Vec<Diagnostic>,
}

impl Playprint {
    /// Encoded playprint.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Field failures in write order.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when every field was written.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take the bytes, discarding diagnostics.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Take the bytes, failing with the first diagnostic if there is one.
    pub fn into_strict(self) -> Result<Vec<u8>> {
        match self.diagnostics.into_iter().next() {
            Some(d) => Err(d.error),
            None => Ok(self.bytes),
        }
    }

    /// Write the bytes to a file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Compile with the built-in type registry.
pub fn compile(workprint: &Workprint, refs: &ReferenceTable, options: &CompileOptions) -> Result<Playprint> {
    compile_with_registry(workprint, refs, options, TypeRegistry::builtin())
}

/// Compile, typing attributes through `registry`.
///
/// Errors building the item tree (unknown type names, values that do not fit
/// their kind) abort the compile, as does a sink that stops accepting bytes.
/// Missing data and unresolved references are collected into the returned
/// [`Playprint`].
pub fn compile_with_registry(
    workprint: &Workprint,
    refs: &ReferenceTable,
    options: &CompileOptions,
    registry: &TypeRegistry,
) -> Result<Playprint> {
    if workprint.root().is_none() {
        return Err(Error::invalid("workprint has no root"));
    }

    let items = ItemTree::build(workprint, registry)?;
    debug!(
        items = items.len(),
        refs = refs.len(),
        format = %options.scalar_format(),
        endian = %options.byte_order(),
        "compiling playprint"
    );

    let mut sink = PlayprintSink::new(refs, options);
    let diagnostics = items.write(&mut sink)?;
    let bytes = sink.into_bytes();

    debug!(bytes = bytes.len(), failures = diagnostics.len(), "playprint written");
    Ok(Playprint { bytes, diagnostics })
}
