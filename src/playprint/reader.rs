//! Playprint field reader.
//!
//! Walks a playprint buffer field by field. Typed reads need the caller to
//! know each field's kind; [`FieldReader::skip_field`] uses the length prefix
//! alone so unknown fields can be stepped over.

use crate::types::{DataArray, DataKind, MediaRef, TaggedValue};
use crate::util::{from_fixed16_16, from_fixed20_12, Error, Mat43, Result, ScalarFormat, Vec2, Vec3, Vec4};

use super::compile::CompileOptions;
use super::refs::ReferenceTable;
use super::sink::Endian;

/// Cursor over an encoded playprint.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
    format: ScalarFormat,
}

impl<'a> FieldReader<'a> {
    /// Read `buf` with the byte order and scalar format it was compiled with.
    pub fn new(buf: &'a [u8], options: &CompileOptions) -> Self {
        Self {
            buf,
            pos: 0,
            endian: options.byte_order(),
            format: options.scalar_format(),
        }
    }

    /// Current read offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True once every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + n)
            .ok_or(Error::UnexpectedEof { at: self.pos, need: n })?;
        self.pos += n;
        Ok(bytes)
    }

    /// Read a 32-bit signed integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        let endian = self.endian;
        Ok(endian.read_i32(self.take(4)?))
    }

    /// Read a 32-bit IEEE float.
    pub fn read_f32(&mut self) -> Result<f32> {
        let endian = self.endian;
        Ok(endian.read_f32(self.take(4)?))
    }

    /// Read one format-aware component and decode it to a float.
    pub fn read_scalar(&mut self) -> Result<f32> {
        match self.format {
            ScalarFormat::Floating => self.read_f32(),
            ScalarFormat::Fixed16_16 => Ok(from_fixed16_16(self.read_i32()?)),
            ScalarFormat::Fixed20_12 => Ok(from_fixed20_12(self.read_i32()?)),
        }
    }

    /// Read a field length prefix.
    pub fn read_length(&mut self) -> Result<usize> {
        let at = self.pos;
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| Error::other(format!("negative field length {len} at offset {at}")))
    }

    /// Read a reference-table index.
    pub fn read_index(&mut self) -> Result<u32> {
        let at = self.pos;
        let index = self.read_i32()?;
        u32::try_from(index).map_err(|_| Error::other(format!("negative reference index {index} at offset {at}")))
    }

    /// Skip one field using only its length prefix; returns the payload length.
    pub fn skip_field(&mut self) -> Result<usize> {
        let len = self.read_length()?;
        self.take(len)?;
        Ok(len)
    }

    fn expect_length(&mut self, kind: DataKind, expected: usize) -> Result<()> {
        let len = self.read_length()?;
        if len != expected {
            return Err(Error::mismatch(
                format!("{kind} field of {expected} bytes"),
                format!("{len} bytes"),
            ));
        }
        Ok(())
    }

    /// Read one field of `kind`. References are mapped back to asset names
    /// through `refs`.
    pub fn read_value(&mut self, kind: DataKind, refs: &ReferenceTable) -> Result<TaggedValue> {
        if let Some(expected) = kind.declared_len() {
            self.expect_length(kind, expected)?;
        }

        let value = match kind {
            DataKind::Enum => TaggedValue::Enum(self.read_i32()?),
            DataKind::Float => TaggedValue::Float(self.read_f32()?),
            DataKind::Float3 => {
                let v = [self.read_f32()?, self.read_f32()?, self.read_f32()?];
                TaggedValue::Float3(Some(Vec3::from_array(v)))
            }
            DataKind::Matrix43 => {
                let mut m = [0.0f32; Mat43::LEN];
                for c in &mut m {
                    *c = self.read_f32()?;
                }
                TaggedValue::Matrix43(Some(Mat43::from_elements(m)))
            }
            DataKind::Vector2 => TaggedValue::Vector2(Vec2::new(self.read_scalar()?, self.read_scalar()?)),
            DataKind::Vector4 => TaggedValue::Vector4(Vec4::new(
                self.read_scalar()?,
                self.read_scalar()?,
                self.read_scalar()?,
                self.read_scalar()?,
            )),
            DataKind::IntArray => {
                let len = self.read_length()?;
                TaggedValue::IntArray(DataArray::from_payload(self.take(len)?, self.endian)?)
            }
            DataKind::FloatArray => {
                let len = self.read_length()?;
                TaggedValue::FloatArray(DataArray::from_payload(self.take(len)?, self.endian)?)
            }
            DataKind::MediaRef => {
                let index = self.read_index()?;
                let asset = refs
                    .get(index as usize)
                    .ok_or_else(|| Error::ReferenceNotFound(format!("index {index}")))?;
                TaggedValue::MediaRef(Some(MediaRef::new(asset.name.as_str())))
            }
        };
        Ok(value)
    }
}
