//! Case-insensitive interned field name (C1).
//!
//! Stores both the original-cased form and a lowercased form; equality and
//! hashing use the lowercased form, iteration/serialization use the
//! original. No global intern table is kept (see SPEC_FULL.md §9 — the
//! design note marks one optional, and at deb822 field-name scale it buys
//! nothing).

use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Eq)]
pub struct FieldName {
    original: String,
    lower: String,
}

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        let original = name.into();
        let lower = original.to_ascii_lowercase();
        FieldName { original, lower }
    }

    /// The name as originally cased.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The lowercased form used for equality, hashing and lookups.
    pub fn as_lowercase(&self) -> &str {
        &self.lower
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for FieldName {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.lower.eq_ignore_ascii_case(other)
    }
}

impl Hash for FieldName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lower.hash(state)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        FieldName::new(s)
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        FieldName::new(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FieldName::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(name: &FieldName) -> u64 {
        let mut h = DefaultHasher::new();
        name.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_equality_is_case_insensitive() {
        let a = FieldName::new("Package");
        let b = FieldName::new("package");
        let c = FieldName::new("PACKAGE");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_original_casing_preserved() {
        let a = FieldName::new("Package");
        assert_eq!(a.as_str(), "Package");
        assert_eq!(a.as_lowercase(), "package");
        assert_eq!(a.to_string(), "Package");
    }

    #[test]
    fn test_different_names_not_equal() {
        assert_ne!(FieldName::new("Package"), FieldName::new("Source"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_field_name_serde_round_trips_with_original_casing() {
        let name = FieldName::new("Package");
        let serialized = serde_json::to_string(&name).unwrap();
        assert_eq!(serialized, "\"Package\"");
        let deserialized: FieldName = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, name);
        assert_eq!(deserialized.as_str(), "Package");
    }
}
