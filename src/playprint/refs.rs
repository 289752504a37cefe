//! External asset reference table.
//!
//! Opaque references are written as a zero-based index into this table. The
//! table is sorted by name ascending so resolution is a binary search; the
//! ordering is validated when the table is built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::{Error, Result};

/// One named external asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset name used by `MediaRef` fields.
    pub name: String,
    /// Handle owned by the asset collector; opaque to the compiler.
    #[serde(default)]
    pub handle: u64,
}

impl AssetRef {
    /// Create an asset entry.
    pub fn new(name: impl Into<String>, handle: u64) -> Self {
        Self { name: name.into(), handle }
    }
}

/// Name-sorted table of external assets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    entries: Vec<AssetRef>,
}

impl ReferenceTable {
    /// Table with no assets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from entries that must already be strictly ascending by name.
    ///
    /// Unsorted or duplicate names are rejected; either would make binary
    /// search resolve to the wrong asset.
    pub fn new(entries: Vec<AssetRef>) -> Result<Self> {
        if let Some(w) = entries.windows(2).find(|w| w[0].name >= w[1].name) {
            return Err(Error::UnsortedReferenceTable {
                prev: w[0].name.clone(),
                next: w[1].name.clone(),
            });
        }
        Ok(Self { entries })
    }

    /// Build from entries in any order. Duplicate names are still rejected.
    pub fn from_unsorted(mut entries: Vec<AssetRef>) -> Result<Self> {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self::new(entries)
    }

    /// Load a JSON array of `{ "name", "handle" }` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let entries: Vec<AssetRef> = serde_json::from_str(&text)?;
        Self::from_unsorted(entries)
    }

    /// Zero-based index of the asset named `name`.
    pub fn resolve(&self, name: &str) -> Result<u32> {
        let index = self
            .entries
            .binary_search_by(|e| e.name.as_str().cmp(name))
            .map_err(|_| Error::ReferenceNotFound(name.to_string()))?;
        u32::try_from(index).map_err(|_| Error::other(format!("reference index {index} overflows")))
    }

    /// Entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&AssetRef> {
        self.entries.get(index)
    }

    /// Number of assets.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetRef> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greek() -> ReferenceTable {
        ReferenceTable::new(vec![
            AssetRef::new("alpha", 10),
            AssetRef::new("beta", 20),
            AssetRef::new("gamma", 30),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve() {
        let table = greek();
        assert_eq!(table.resolve("alpha").unwrap(), 0);
        assert_eq!(table.resolve("beta").unwrap(), 1);
        assert_eq!(table.resolve("gamma").unwrap(), 2);
        assert!(matches!(table.resolve("delta"), Err(Error::ReferenceNotFound(ref n)) if n == "delta"));
        assert_eq!(table.get(1).unwrap().handle, 20);
    }

    #[test]
    fn test_unsorted_rejected() {
        let err = ReferenceTable::new(vec![AssetRef::new("beta", 0), AssetRef::new("alpha", 0)]).unwrap_err();
        assert!(matches!(err, Error::UnsortedReferenceTable { ref prev, ref next } if prev == "beta" && next == "alpha"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let dup = vec![AssetRef::new("a", 0), AssetRef::new("a", 1)];
        assert!(ReferenceTable::new(dup.clone()).is_err());
        assert!(ReferenceTable::from_unsorted(dup).is_err());
    }

    #[test]
    fn test_from_unsorted_sorts() {
        let table = ReferenceTable::from_unsorted(vec![
            AssetRef::new("gamma", 3),
            AssetRef::new("alpha", 1),
            AssetRef::new("beta", 2),
        ])
        .unwrap();
        let names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert_eq!(table.get(2).unwrap().handle, 3);
        assert!(ReferenceTable::empty().resolve("alpha").is_err());
    }
}
