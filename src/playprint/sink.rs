//! Playprint output sink.
//!
//! An append-only byte buffer with length-framed primitive writes. Bytes are
//! never patched after they are written, so every length prefix must be
//! known before its payload.

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::util::{Error, Result, ScalarFormat};

use super::compile::CompileOptions;
use super::refs::ReferenceTable;

/// Byte order of every multi-byte primitive in a playprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    /// Decode an i32 from the first four bytes of `b`.
    #[inline]
    pub fn read_i32(self, b: &[u8]) -> i32 {
        match self {
            Self::Little => LittleEndian::read_i32(b),
            Self::Big => BigEndian::read_i32(b),
        }
    }

    /// Decode an f32 from the first four bytes of `b`.
    #[inline]
    pub fn read_f32(self, b: &[u8]) -> f32 {
        match self {
            Self::Little => LittleEndian::read_f32(b),
            Self::Big => BigEndian::read_f32(b),
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Little => "little",
            Self::Big => "big",
        })
    }
}

impl FromStr for Endian {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(Self::Little),
            "big" | "be" => Ok(Self::Big),
            other => Err(Error::other(format!("unknown byte order '{other}'"))),
        }
    }
}

/// Output sink for one compile pass.
pub struct PlayprintSink<'r> {
    buf: Vec<u8>,
    format: ScalarFormat,
    endian: Endian,
    limit: Option<usize>,
    refs: &'r ReferenceTable,
}

impl<'r> PlayprintSink<'r> {
    /// Create a sink resolving references against `refs`.
    pub fn new(refs: &'r ReferenceTable, options: &CompileOptions) -> Self {
        Self {
            buf: Vec::new(),
            format: options.scalar_format(),
            endian: options.byte_order(),
            limit: options.size_limit(),
            refs,
        }
    }

    /// Selected scalar format for format-aware components.
    #[inline]
    pub fn scalar_format(&self) -> ScalarFormat {
        self.format
    }

    /// Byte order of written primitives.
    #[inline]
    pub fn byte_order(&self) -> Endian {
        self.endian
    }

    /// Get the current write position.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish the pass and take the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Make room for `n` more bytes or fail without writing anything.
    fn reserve(&mut self, n: usize) -> Result<()> {
        let needed = self.buf.len().saturating_add(n);
        if let Some(limit) = self.limit {
            if needed > limit {
                return Err(Error::SinkWrite(format!(
                    "playprint would grow to {needed} bytes, limit is {limit}"
                )));
            }
        }
        self.buf
            .try_reserve(n)
            .map_err(|e| Error::SinkWrite(e.to_string()))
    }

    /// Write a 32-bit signed integer.
    pub fn write_int(&mut self, value: i32) -> Result<()> {
        self.reserve(4)?;
        let written = match self.endian {
            Endian::Little => self.buf.write_i32::<LittleEndian>(value),
            Endian::Big => self.buf.write_i32::<BigEndian>(value),
        };
        written.map_err(|e| Error::SinkWrite(e.to_string()))
    }

    /// Write a 32-bit IEEE float.
    pub fn write_float(&mut self, value: f32) -> Result<()> {
        self.reserve(4)?;
        let written = match self.endian {
            Endian::Little => self.buf.write_f32::<LittleEndian>(value),
            Endian::Big => self.buf.write_f32::<BigEndian>(value),
        };
        written.map_err(|e| Error::SinkWrite(e.to_string()))
    }

    /// Write the length prefix of a field whose payload is `len` bytes.
    pub fn write_offset_length(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len)
            .map_err(|_| Error::SinkWrite(format!("field length {len} exceeds 32 bits")))?;
        self.write_int(len)
    }

    /// Write a resolved reference-table index.
    pub fn write_index(&mut self, index: u32) -> Result<()> {
        let index = i32::try_from(index)
            .map_err(|_| Error::SinkWrite(format!("reference index {index} exceeds 31 bits")))?;
        self.write_int(index)
    }

    /// Resolve an asset name to its reference-table index.
    #[inline]
    pub fn resolve_reference(&self, name: &str) -> Result<u32> {
        self.refs.resolve(name)
    }
}
