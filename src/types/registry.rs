//! Type registry - maps type names to data type handlers.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::util::{Error, Result};

use super::DataKind;

/// One registered handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    /// Registered name (unique within the registry).
    pub name: String,
    /// Handler selected by this name.
    pub kind: DataKind,
}

/// Name -> handler mapping.
///
/// Lookup is O(1); enumeration follows insertion order. Several names may
/// select the same kind, but a name can be registered only once.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_name: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in kind under its own name.
    pub fn with_builtins() -> Self {
        let entries: Vec<TypeEntry> = DataKind::ALL
            .into_iter()
            .map(|kind| TypeEntry { name: kind.name().to_string(), kind })
            .collect();
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entries, by_name }
    }

    /// Shared registry of built-in kinds.
    pub fn builtin() -> &'static TypeRegistry {
        static BUILTIN: OnceLock<TypeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(Self::with_builtins)
    }

    /// Register `kind` under `name`. Fails if the name is already taken.
    pub fn register(&mut self, name: &str, kind: DataKind) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateTypeRegistration(name.to_string()));
        }
        self.by_name.insert(name.to_string(), self.entries.len());
        self.entries.push(TypeEntry { name: name.to_string(), kind });
        Ok(())
    }

    /// Find the handler registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<DataKind> {
        self.by_name
            .get(name)
            .map(|&i| self.entries[i].kind)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let reg = TypeRegistry::builtin();
        assert_eq!(reg.len(), DataKind::ALL.len());
        assert_eq!(reg.lookup("MlVector2").unwrap(), DataKind::Vector2);
        assert_eq!(reg.lookup("IntArray").unwrap(), DataKind::IntArray);
        assert_eq!(reg.lookup("MediaRef").unwrap(), DataKind::MediaRef);
        assert!(matches!(reg.lookup("MlVector9"), Err(Error::UnknownType(_))));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut reg = TypeRegistry::with_builtins();
        let err = reg.register("float", DataKind::Float).unwrap_err();
        assert!(matches!(err, Error::DuplicateTypeRegistration(ref n) if n == "float"));
        assert_eq!(reg.len(), DataKind::ALL.len());
    }

    #[test]
    fn test_register_alias_keeps_insertion_order() {
        let mut reg = TypeRegistry::new();
        assert!(reg.is_empty());
        reg.register("MlReal", DataKind::Float).unwrap();
        reg.register("enum", DataKind::Enum).unwrap();
        reg.register("MlScalar", DataKind::Float).unwrap();

        let names: Vec<&str> = reg.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["MlReal", "enum", "MlScalar"]);
        assert_eq!(reg.lookup("MlScalar").unwrap(), DataKind::Float);
        assert!(reg.contains("MlReal"));
        assert!(!reg.contains("float"));
    }
}
