//! TaggedValue - one typed field value.

use crate::playprint::PlayprintSink;
use crate::util::{Error, Mat43, Result, Vec2, Vec3, Vec4};
use crate::workprint::AttrValue;

use super::{DataArray, DataKind};

/// Named external asset referenced by a field.
///
/// Only the name travels through the compiler; it is resolved to a
/// reference-table index when written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaRef {
    name: String,
}

impl MediaRef {
    /// Create a reference to the named asset.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Asset name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A single typed value slot.
///
/// The variant is the handler: [`TaggedValue::kind`] always names the
/// [`DataKind`] that interprets the payload, so the two cannot disagree.
/// `None` payloads model absent data and fail when written.
#[derive(Clone, Debug, PartialEq)]
pub enum TaggedValue {
    Enum(i32),
    Float(f32),
    Float3(Option<Vec3>),
    Matrix43(Option<Mat43>),
    Vector2(Vec2),
    Vector4(Vec4),
    IntArray(DataArray<i32>),
    FloatArray(DataArray<f32>),
    MediaRef(Option<MediaRef>),
}

impl TaggedValue {
    /// Default (empty) value of a kind.
    pub fn empty(kind: DataKind) -> Self {
        match kind {
            DataKind::Enum => Self::Enum(0),
            DataKind::Float => Self::Float(0.0),
            DataKind::Float3 => Self::Float3(None),
            DataKind::Matrix43 => Self::Matrix43(None),
            DataKind::Vector2 => Self::Vector2(Vec2::ZERO),
            DataKind::Vector4 => Self::Vector4(Vec4::ZERO),
            DataKind::IntArray => Self::IntArray(DataArray::new()),
            DataKind::FloatArray => Self::FloatArray(DataArray::new()),
            DataKind::MediaRef => Self::MediaRef(None),
        }
    }

    /// Handler kind of this value.
    #[inline]
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Enum(_) => DataKind::Enum,
            Self::Float(_) => DataKind::Float,
            Self::Float3(_) => DataKind::Float3,
            Self::Matrix43(_) => DataKind::Matrix43,
            Self::Vector2(_) => DataKind::Vector2,
            Self::Vector4(_) => DataKind::Vector4,
            Self::IntArray(_) => DataKind::IntArray,
            Self::FloatArray(_) => DataKind::FloatArray,
            Self::MediaRef(_) => DataKind::MediaRef,
        }
    }

    /// True when the slot holds no data for a kind that requires it.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Float3(None) | Self::Matrix43(None) | Self::MediaRef(None))
    }

    /// Byte length declared in this value's field prefix.
    pub fn declared_len(&self) -> usize {
        match self {
            Self::IntArray(a) => a.byte_len(),
            Self::FloatArray(a) => a.byte_len(),
            other => other.kind().declared_len().unwrap_or(0),
        }
    }

    /// Copy `src` into this slot, replacing the previous payload.
    ///
    /// Arrays are deep-copied; the slot never shares storage with `src`.
    pub fn assign(&mut self, src: &TaggedValue) -> Result<()> {
        if src.kind() != self.kind() {
            return Err(Error::mismatch(self.kind(), src.kind()));
        }
        *self = src.clone();
        Ok(())
    }

    /// Encode through this value's handler.
    #[inline]
    pub fn write(&self, sink: &mut PlayprintSink<'_>) -> Result<()> {
        self.kind().write(sink, self)
    }

    /// Convert an authored attribute value into a value of `kind`.
    pub fn from_attr(kind: DataKind, attr: &AttrValue) -> Result<Self> {
        let mismatch = || Error::mismatch(kind, attr.describe());

        let value = match kind {
            DataKind::Enum => match attr {
                AttrValue::Int(i) => Self::Enum(i32::try_from(*i).map_err(|_| mismatch())?),
                _ => return Err(mismatch()),
            },
            DataKind::Float => Self::Float(attr.as_f32().ok_or_else(mismatch)?),
            DataKind::Float3 => match attr {
                AttrValue::None => Self::Float3(None),
                _ => {
                    let v = attr.as_f32_array::<3>().ok_or_else(mismatch)?;
                    Self::Float3(Some(Vec3::from_array(v)))
                }
            },
            DataKind::Matrix43 => match attr {
                AttrValue::None => Self::Matrix43(None),
                _ => {
                    let m = attr.as_f32_array::<12>().ok_or_else(mismatch)?;
                    Self::Matrix43(Some(Mat43::from_elements(m)))
                }
            },
            DataKind::Vector2 => match attr {
                AttrValue::None => return Err(Error::MissingData { kind }),
                _ => Self::Vector2(Vec2::from_array(attr.as_f32_array::<2>().ok_or_else(mismatch)?)),
            },
            DataKind::Vector4 => match attr {
                AttrValue::None => return Err(Error::MissingData { kind }),
                _ => Self::Vector4(Vec4::from_array(attr.as_f32_array::<4>().ok_or_else(mismatch)?)),
            },
            DataKind::IntArray => match attr {
                AttrValue::Ints(v) => {
                    let ints = v
                        .iter()
                        .map(|i| i32::try_from(*i))
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(|_| mismatch())?;
                    Self::IntArray(ints.into())
                }
                _ => return Err(mismatch()),
            },
            DataKind::FloatArray => Self::FloatArray(attr.as_f32_vec().ok_or_else(mismatch)?.into()),
            DataKind::MediaRef => match attr {
                AttrValue::None => Self::MediaRef(None),
                AttrValue::Str(name) => Self::MediaRef(Some(MediaRef::new(name.as_str()))),
                _ => return Err(mismatch()),
            },
        };
        Ok(value)
    }
}

impl From<i32> for TaggedValue {
    fn from(v: i32) -> Self {
        Self::Enum(v)
    }
}

impl From<f32> for TaggedValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for TaggedValue {
    fn from(v: Vec2) -> Self {
        Self::Vector2(v)
    }
}

impl From<Vec3> for TaggedValue {
    fn from(v: Vec3) -> Self {
        Self::Float3(Some(v))
    }
}

impl From<Vec4> for TaggedValue {
    fn from(v: Vec4) -> Self {
        Self::Vector4(v)
    }
}

impl From<Mat43> for TaggedValue {
    fn from(m: Mat43) -> Self {
        Self::Matrix43(Some(m))
    }
}

impl From<MediaRef> for TaggedValue {
    fn from(r: MediaRef) -> Self {
        Self::MediaRef(Some(r))
    }
}

impl From<Vec<i32>> for TaggedValue {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v.into())
    }
}

impl From<Vec<f32>> for TaggedValue {
    fn from(v: Vec<f32>) -> Self {
        Self::FloatArray(v.into())
    }
}
