//! Owned homogeneous arrays for the int-array and float-array kinds.

use std::fmt;

use bytemuck::Pod;

use crate::playprint::{Endian, PlayprintSink};
use crate::util::{Error, Result};

use super::DataKind;

/// Single element value passed through the generic element accessors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementValue {
    Int(i32),
    Float(f32),
}

/// Element type of a [`DataArray`].
///
/// This is the element half of an array handler: the container stays generic
/// and delegates sizing and encoding to the element kind.
pub trait ArrayElement: Pod + Default + PartialEq + fmt::Debug {
    /// Array kind holding elements of this type.
    const ARRAY_KIND: DataKind;

    /// Encoded size of one element in bytes.
    const SIZE: usize = std::mem::size_of::<Self>();

    /// Decode one element from exactly [`Self::SIZE`] bytes.
    fn read_element(bytes: &[u8], endian: Endian) -> Self;

    /// Encode one element into the sink.
    fn write_element(self, sink: &mut PlayprintSink<'_>) -> Result<()>;

    /// Widen to an element value.
    fn to_value(self) -> ElementValue;

    /// Narrow from an element value; `None` on kind mismatch.
    fn from_value(v: ElementValue) -> Option<Self>;
}

impl ArrayElement for i32 {
    const ARRAY_KIND: DataKind = DataKind::IntArray;

    fn read_element(bytes: &[u8], endian: Endian) -> Self {
        endian.read_i32(bytes)
    }

    fn write_element(self, sink: &mut PlayprintSink<'_>) -> Result<()> {
        sink.write_int(self)
    }

    fn to_value(self) -> ElementValue {
        ElementValue::Int(self)
    }

    fn from_value(v: ElementValue) -> Option<Self> {
        match v {
            ElementValue::Int(i) => Some(i),
            ElementValue::Float(_) => None,
        }
    }
}

impl ArrayElement for f32 {
    const ARRAY_KIND: DataKind = DataKind::FloatArray;

    fn read_element(bytes: &[u8], endian: Endian) -> Self {
        endian.read_f32(bytes)
    }

    fn write_element(self, sink: &mut PlayprintSink<'_>) -> Result<()> {
        sink.write_float(self)
    }

    fn to_value(self) -> ElementValue {
        ElementValue::Float(self)
    }

    fn from_value(v: ElementValue) -> Option<Self> {
        match v {
            ElementValue::Float(f) => Some(f),
            ElementValue::Int(_) => None,
        }
    }
}

/// Owned, resizable array of fixed-size elements.
#[derive(Clone, Default, PartialEq)]
pub struct DataArray<T: ArrayElement> {
    elements: Vec<T>,
}

impl<T: ArrayElement> DataArray<T> {
    /// Create an empty array.
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Create an array of `len` default elements.
    pub fn with_len(len: usize) -> Self {
        Self { elements: vec![T::default(); len] }
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn element_size(&self) -> usize {
        T::SIZE
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Encoded payload length in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.elements.len() * T::SIZE
    }

    /// Grow or shrink, filling new slots with the default element.
    pub fn resize(&mut self, len: usize) {
        self.elements.resize(len, T::default());
    }

    /// Append an element.
    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    /// Typed element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.elements.get(index).copied()
    }

    /// Replace the typed element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.elements.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or_else(|| Error::other(format!("array index {index} out of bounds (len {len})")))?;
        *slot = value;
        Ok(())
    }

    /// Element at `index` as a generic value.
    pub fn get_element(&self, index: usize) -> Option<ElementValue> {
        self.get(index).map(T::to_value)
    }

    /// Replace the element at `index` from a generic value.
    pub fn set_element(&mut self, index: usize, value: ElementValue) -> Result<()> {
        let v = T::from_value(value)
            .ok_or_else(|| Error::mismatch(T::ARRAY_KIND, format!("{value:?}")))?;
        self.set(index, v)
    }

    /// Decode element `index` from an encoded payload.
    pub fn read_element(payload: &[u8], index: usize, endian: Endian) -> Result<T> {
        let bytes = index
            .checked_mul(T::SIZE)
            .and_then(|start| payload.get(start..start.checked_add(T::SIZE)?))
            .ok_or(Error::UnexpectedEof {
                at: index.saturating_mul(T::SIZE),
                need: T::SIZE,
            })?;
        Ok(T::read_element(bytes, endian))
    }

    /// Decode a whole payload; its length must be a multiple of the element size.
    pub fn from_payload(payload: &[u8], endian: Endian) -> Result<Self> {
        if payload.len() % T::SIZE != 0 {
            return Err(Error::other(format!(
                "{} payload of {} bytes is not a multiple of {}",
                T::ARRAY_KIND,
                payload.len(),
                T::SIZE
            )));
        }
        let elements = payload
            .chunks_exact(T::SIZE)
            .map(|b| T::read_element(b, endian))
            .collect();
        Ok(Self { elements })
    }

    /// Encode element `index` into the sink (no framing).
    pub fn write_element(&self, sink: &mut PlayprintSink<'_>, index: usize) -> Result<()> {
        let v = self
            .get(index)
            .ok_or_else(|| Error::other(format!("array index {index} out of bounds")))?;
        v.write_element(sink)
    }

    /// Encode as a length-framed field: byte length, then every element.
    pub fn write(&self, sink: &mut PlayprintSink<'_>) -> Result<()> {
        sink.write_offset_length(self.byte_len())?;
        for i in 0..self.len() {
            self.write_element(sink, i)?;
        }
        Ok(())
    }

    /// Borrow elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T: ArrayElement> From<Vec<T>> for DataArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T: ArrayElement> From<&[T]> for DataArray<T> {
    fn from(elements: &[T]) -> Self {
        Self { elements: elements.to_vec() }
    }
}

impl<T: ArrayElement> fmt::Debug for DataArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", T::ARRAY_KIND, self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_sizes() {
        let a: DataArray<i32> = vec![1, 2, 3].into();
        assert_eq!(a.element_size(), 4);
        assert_eq!(a.byte_len(), 12);
        assert_eq!(<f32 as ArrayElement>::SIZE, 4);
    }

    #[test]
    fn test_generic_element_access() {
        let mut a = DataArray::<f32>::with_len(2);
        a.set_element(1, ElementValue::Float(2.5)).unwrap();
        assert_eq!(a.get_element(1), Some(ElementValue::Float(2.5)));
        assert_eq!(a.get_element(0), Some(ElementValue::Float(0.0)));
        assert!(a.set_element(0, ElementValue::Int(1)).is_err());
        assert!(a.set_element(5, ElementValue::Float(1.0)).is_err());
        assert_eq!(a.get_element(5), None);
    }

    #[test]
    fn test_resize() {
        let mut a: DataArray<i32> = vec![7].into();
        a.resize(3);
        assert_eq!(a.as_slice(), &[7, 0, 0]);
        a.resize(1);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_from_payload() {
        let payload = [1u8, 0, 0, 0, 0, 0, 0, 0xff];
        let le = DataArray::<i32>::from_payload(&payload, Endian::Little).unwrap();
        assert_eq!(le.as_slice(), &[1, -16777216]);
        let be = DataArray::<i32>::from_payload(&payload, Endian::Big).unwrap();
        assert_eq!(be.as_slice(), &[16777216, 255]);
        assert_eq!(DataArray::<i32>::read_element(&payload, 1, Endian::Big).unwrap(), 255);
        assert!(DataArray::<i32>::read_element(&payload, 2, Endian::Big).is_err());
        assert!(matches!(
            DataArray::<i32>::read_element(&payload, usize::MAX, Endian::Little),
            Err(Error::UnexpectedEof { need: 4, .. })
        ));
        assert!(DataArray::<f32>::read_element(&payload, usize::MAX / 4, Endian::Little).is_err());
        assert!(DataArray::<f32>::from_payload(&payload[..3], Endian::Little).is_err());
    }
}
