//! DataKind - the closed set of playprint data type handlers.

use std::fmt;

use crate::playprint::PlayprintSink;
use crate::util::{to_fixed16_16, to_fixed20_12, Error, Result, ScalarFormat};

use super::TaggedValue;

/// Data kind enum - one variant per data type handler.
///
/// Each kind has a unique name used by authored attributes to select it,
/// and a fixed on-wire layout. Handlers are stateless; all per-value state
/// lives in [`TaggedValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DataKind {
    /// 32-bit enumeration value
    Enum = 0,
    /// Single IEEE float, never format-converted
    Float = 1,
    /// Three IEEE floats, never format-converted
    Float3 = 2,
    /// 4x3 row-major float matrix, never format-converted
    Matrix43 = 3,
    /// Two components in the sink scalar format
    Vector2 = 4,
    /// Four components in the sink scalar format
    Vector4 = 5,
    /// Variable-length array of 32-bit ints
    IntArray = 6,
    /// Variable-length array of IEEE floats
    FloatArray = 7,
    /// External asset reference, written as a table index
    MediaRef = 8,
}

impl DataKind {
    /// All built-in kinds, in registration order.
    pub const ALL: [DataKind; 9] = [
        Self::Enum,
        Self::Float,
        Self::Float3,
        Self::Matrix43,
        Self::Vector2,
        Self::Vector4,
        Self::IntArray,
        Self::FloatArray,
        Self::MediaRef,
    ];

    /// Returns the registered type name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Float => "float",
            Self::Float3 => "Float3",
            Self::Matrix43 => "MlTransform",
            Self::Vector2 => "MlVector2",
            Self::Vector4 => "MlVector4",
            Self::IntArray => "IntArray",
            Self::FloatArray => "FloatArray",
            Self::MediaRef => "MediaRef",
        }
    }

    /// Parse a kind from its built-in name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Byte length declared in the field prefix for fixed-size kinds.
    ///
    /// Arrays return `None`; their length is derived from the element count.
    /// References declare 0 and are followed by a 4-byte index.
    #[inline]
    pub const fn declared_len(self) -> Option<usize> {
        match self {
            Self::Enum | Self::Float => Some(4),
            Self::Float3 => Some(12),
            Self::Matrix43 => Some(48),
            Self::Vector2 => Some(8),
            Self::Vector4 => Some(16),
            Self::MediaRef => Some(0),
            Self::IntArray | Self::FloatArray => None,
        }
    }

    /// Size of one array element, for array kinds only.
    #[inline]
    pub const fn element_size(self) -> Option<usize> {
        match self {
            Self::IntArray | Self::FloatArray => Some(4),
            _ => None,
        }
    }

    /// True for kinds whose components follow the sink scalar format.
    #[inline]
    pub const fn is_format_aware(self) -> bool {
        matches!(self, Self::Vector2 | Self::Vector4)
    }

    /// True for variable-length array kinds.
    #[inline]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::IntArray | Self::FloatArray)
    }

    /// Encode `value` into `sink` as a length-framed field.
    ///
    /// Absent data and unresolvable references fail before any byte of the
    /// field is written. A failing primitive write is returned as-is.
    pub fn write(self, sink: &mut PlayprintSink<'_>, value: &TaggedValue) -> Result<()> {
        if value.kind() != self {
            return Err(Error::mismatch(self, value.kind()));
        }

        match value {
            TaggedValue::Enum(i) => {
                sink.write_offset_length(4)?;
                sink.write_int(*i)
            }
            TaggedValue::Float(f) => {
                sink.write_offset_length(4)?;
                sink.write_float(*f)
            }
            TaggedValue::Float3(v) => {
                let v = v.ok_or(Error::MissingData { kind: self })?;
                sink.write_offset_length(12)?;
                for c in v.to_array() {
                    sink.write_float(c)?;
                }
                Ok(())
            }
            TaggedValue::Matrix43(m) => {
                let m = m.ok_or(Error::MissingData { kind: self })?;
                sink.write_offset_length(48)?;
                for c in m.m {
                    sink.write_float(c)?;
                }
                Ok(())
            }
            TaggedValue::Vector2(v) => {
                sink.write_offset_length(8)?;
                for c in v.to_array() {
                    write_format_scalar(sink, c)?;
                }
                Ok(())
            }
            TaggedValue::Vector4(v) => {
                sink.write_offset_length(16)?;
                for c in v.to_array() {
                    write_format_scalar(sink, c)?;
                }
                Ok(())
            }
            TaggedValue::IntArray(a) => a.write(sink),
            TaggedValue::FloatArray(a) => a.write(sink),
            TaggedValue::MediaRef(r) => {
                let r = r.as_ref().ok_or(Error::MissingData { kind: self })?;
                let index = sink.resolve_reference(r.name())?;
                sink.write_offset_length(0)?;
                sink.write_index(index)
            }
        }
    }
}

/// Write one component in the sink's selected scalar format.
fn write_format_scalar(sink: &mut PlayprintSink<'_>, f: f32) -> Result<()> {
    match sink.scalar_format() {
        ScalarFormat::Floating => sink.write_float(f),
        ScalarFormat::Fixed16_16 => sink.write_int(to_fixed16_16(f)),
        ScalarFormat::Fixed20_12 => sink.write_int(to_fixed20_12(f)),
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
