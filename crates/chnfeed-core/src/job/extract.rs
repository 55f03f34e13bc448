//! Group prefixed keys of a flat store into per-job field sets.

use std::collections::BTreeMap;

use super::profile::{Indexing, JobProfile};
use crate::keystore::{strip_quotes, FlatKeyStore};

/// Fields of one discovered job, with the `<NS><i>_` prefix removed.
///
/// Recognised fields are consumed with [`RawFieldSet::take`]; whatever is left
/// afterwards are filter candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFieldSet {
    index: Option<usize>,
    fields: BTreeMap<String, String>,
}

impl RawFieldSet {
    pub fn new(index: Option<usize>) -> Self {
        Self {
            index,
            fields: BTreeMap::new(),
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Human readable job index for logs ("3" or "single").
    pub fn label(&self) -> String {
        match self.index {
            Some(i) => i.to_string(),
            None => "single".to_string(),
        }
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_ascii_uppercase(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(&field.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Remove a field and return its value with one layer of quotes stripped.
    pub fn take(&mut self, field: &str) -> Option<String> {
        self.fields
            .remove(&field.to_ascii_uppercase())
            .map(|v| strip_quotes(&v).to_string())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Consume the set, yielding whatever fields were not taken.
    pub fn into_remaining(self) -> impl Iterator<Item = (String, String)> {
        self.fields.into_iter()
    }
}

/// Lazily yields one [`RawFieldSet`] per job index that has at least one key.
///
/// Indices are scanned in ascending order; indices with no matching key are
/// skipped silently.
pub struct JobExtractor<'a> {
    store: &'a FlatKeyStore,
    namespace: String,
    indices: std::vec::IntoIter<Option<usize>>,
}

impl<'a> JobExtractor<'a> {
    pub fn new(store: &'a FlatKeyStore, namespace: &str, indexing: Indexing) -> Self {
        Self {
            store,
            namespace: namespace.to_ascii_uppercase(),
            indices: indexing.indices().into_iter(),
        }
    }

    pub fn for_profile(store: &'a FlatKeyStore, profile: &JobProfile) -> Self {
        Self::new(store, profile.namespace, profile.indexing)
    }

    fn prefix(&self, index: Option<usize>) -> String {
        match index {
            Some(i) => format!("{}{}_", self.namespace, i),
            None => format!("{}_", self.namespace),
        }
    }

    fn collect_index(&self, index: Option<usize>) -> RawFieldSet {
        let prefix = self.prefix(index);
        let mut set = RawFieldSet::new(index);
        for (key, value) in self.store.iter() {
            if let Some(field) = key.strip_prefix(prefix.as_str()) {
                if !field.is_empty() {
                    set.insert(field, value);
                }
            }
        }
        set
    }
}

impl Iterator for JobExtractor<'_> {
    type Item = RawFieldSet;

    fn next(&mut self) -> Option<RawFieldSet> {
        while let Some(index) = self.indices.next() {
            let set = self.collect_index(index);
            tracing::debug!(
                index = %set.label(),
                fields = ?set.field_names().collect::<Vec<_>>(),
                "collected job field set"
            );
            if !set.is_empty() {
                return Some(set);
            }
        }
        None
    }
}
