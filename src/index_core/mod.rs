//! Index Core - lookup table from simple or qualified type names to javadoc locations
//!
//! The index is assembled once through [`NameIndexBuilder`] and then frozen
//! into a read-only [`NameIndex`]. Every key keeps all locations registered
//! for it, in insertion order; more than one location marks the key as
//! ambiguous.

use std::collections::HashMap;

pub mod policy;

pub use policy::LocationPolicy;

/// Outcome of a [`NameIndex`] query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Missing,
    Unique(&'a str),
    Ambiguous(&'a [String]),
}

/// Lookup keys for a type: the `$` forms, plus the `.` forms for nested types.
///
/// `class_name` uses `$` as the nested-type separator.
pub fn lookup_keys(package: &str, class_name: &str) -> Vec<String> {
    let mut keys = vec![class_name.to_string(), format!("{package}.{class_name}")];
    if class_name.contains('$') {
        let dotted = class_name.replace('$', ".");
        keys.push(format!("{package}.{dotted}"));
        keys.push(dotted);
    }
    keys
}

/// Mutable accumulator for a [`NameIndex`]
#[derive(Debug, Default)]
pub struct NameIndexBuilder {
    entries: HashMap<String, Vec<String>>,
}

impl NameIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `location` under `key`. Duplicates are kept.
    pub fn add(&mut self, key: impl Into<String>, location: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .push(location.into());
    }

    /// Register a type under every key form from [`lookup_keys`].
    ///
    /// Types without a package are ignored since their qualified key would
    /// collide with the simple one.
    pub fn register_type(&mut self, package: &str, class_name: &str, location: &str) {
        if package.is_empty() || class_name.is_empty() {
            return;
        }
        for key in lookup_keys(package, class_name) {
            self.add(key, location);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> NameIndex {
        NameIndex {
            entries: self.entries,
        }
    }
}

/// Read-only lookup table built once per run
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: HashMap<String, Vec<String>>,
}

impl NameIndex {
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        match self.entries.get(key).map(Vec::as_slice) {
            None | Some([]) => Lookup::Missing,
            Some([location]) => Lookup::Unique(location),
            Some(locations) => Lookup::Ambiguous(locations),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys with more than one location
    pub fn ambiguous_count(&self) -> usize {
        self.entries.values().filter(|v| v.len() > 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keys_for_plain_class() {
        assert_eq!(
            lookup_keys("com.example", "Widget"),
            vec!["Widget", "com.example.Widget"]
        );
    }

    #[test]
    fn test_lookup_keys_for_nested_class() {
        assert_eq!(
            lookup_keys("com.example", "Widget$Part"),
            vec![
                "Widget$Part",
                "com.example.Widget$Part",
                "com.example.Widget.Part",
                "Widget.Part",
            ]
        );
    }

    #[test]
    fn test_lookup_unique_and_missing() {
        let mut builder = NameIndexBuilder::new();
        builder.register_type("com.example", "Widget", "com.example.Widget");
        let index = builder.build();

        assert_eq!(index.lookup("Widget"), Lookup::Unique("com.example.Widget"));
        assert_eq!(
            index.lookup("com.example.Widget"),
            Lookup::Unique("com.example.Widget")
        );
        assert_eq!(index.lookup("Gadget"), Lookup::Missing);
    }

    #[test]
    fn test_duplicates_are_ambiguous() {
        let mut builder = NameIndexBuilder::new();
        builder.add("Widget", "a.Widget");
        builder.add("Widget", "a.Widget");
        let index = builder.build();

        match index.lookup("Widget") {
            Lookup::Ambiguous(locations) => assert_eq!(locations.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert_eq!(index.ambiguous_count(), 1);
    }

    #[test]
    fn test_types_without_package_are_ignored() {
        let mut builder = NameIndexBuilder::new();
        builder.register_type("", "Widget", "Widget");
        assert!(builder.is_empty());
    }
}
