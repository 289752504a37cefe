//! Math type re-exports and the playprint 4x3 transform.

pub use glam::{Affine3A, Mat3, Vec2, Vec3, Vec4};

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// 4x3 float matrix stored as twelve elements in row-major order.
///
/// Rows 0..3 hold the linear part (one basis axis per row) and row 3 holds
/// the translation, the row-vector convention the runtime loader expects.
#[derive(Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mat43 {
    pub m: [f32; 12],
}

impl Mat43 {
    /// Number of elements.
    pub const LEN: usize = 12;

    /// Identity transform.
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, //
            0.0, 0.0, 0.0,
        ],
    };

    /// Create from twelve row-major elements.
    #[inline]
    pub const fn from_elements(m: [f32; 12]) -> Self {
        Self { m }
    }

    /// Create from a slice; `None` unless it holds exactly twelve elements.
    pub fn from_slice(s: &[f32]) -> Option<Self> {
        let m: [f32; 12] = s.try_into().ok()?;
        Some(Self { m })
    }

    /// Element at `row`, `col` (row < 4, col < 3).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 3 + col]
    }

    /// Translation row.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[9], self.m[10], self.m[11])
    }
}

impl Default for Mat43 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine3A> for Mat43 {
    fn from(a: Affine3A) -> Self {
        Self { m: a.to_cols_array() }
    }
}

impl From<Mat43> for Affine3A {
    fn from(m: Mat43) -> Self {
        Affine3A::from_cols_array(&m.m)
    }
}

impl fmt::Debug for Mat43 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.m.chunks(3)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat43_from_affine() {
        let a = Affine3A::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let m = Mat43::from(a);
        assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(Affine3A::from(m), a);
    }

    #[test]
    fn test_mat43_from_slice() {
        let elems: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let m = Mat43::from_slice(&elems).unwrap();
        assert_eq!(m.get(3, 2), 11.0);
        assert!(Mat43::from_slice(&elems[..11]).is_none());
        assert_eq!(std::mem::size_of::<Mat43>(), 48);
    }
}
