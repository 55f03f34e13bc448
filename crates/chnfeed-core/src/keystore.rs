//! Flat key/value configuration namespace (environment or flattened file).

use std::collections::BTreeMap;

/// Case-normalized mapping from configuration key to raw string value.
///
/// Keys are stored upper-cased with surrounding quotes removed; values are
/// kept verbatim (quote stripping happens when a field is consumed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatKeyStore {
    entries: BTreeMap<String, String>,
}

impl FlatKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect process environment variables whose name starts with `namespace`
    /// (compared case-insensitively).
    pub fn from_env(namespace: &str) -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_pairs(vars).retain_namespace(namespace)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (k, v) in pairs {
            store.insert(k.as_ref(), v);
        }
        store
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(normalize_key(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize_key(key)).map(String::as_str)
    }

    /// Drop every key that does not start with `namespace`.
    pub fn retain_namespace(mut self, namespace: &str) -> Self {
        let ns = namespace.to_ascii_uppercase();
        self.entries.retain(|k, _| k.starts_with(&ns));
        self
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    strip_quotes(key.trim()).to_ascii_uppercase()
}

/// Remove one layer of matching surrounding quotes (`"..."` or `'...'`).
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
