//! Job configuration sources: process environment or a sectioned TOML file.
//!
//! Both are flattened into a [`FlatKeyStore`] using the profile's key
//! convention, so job discovery is identical for either source.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use toml::{Table, Value};

use crate::job::JobProfile;
use crate::keystore::FlatKeyStore;

/// Load the key store for `profile` from `path`, or from the environment.
pub fn load(profile: &JobProfile, path: Option<&Path>) -> Result<FlatKeyStore> {
    match path {
        Some(p) => load_file(profile, p),
        None => {
            let store = FlatKeyStore::from_env(profile.namespace);
            tracing::debug!("retrieved {} {} key(s) from environment", store.len(), profile.namespace);
            Ok(store)
        }
    }
}

pub fn load_file(profile: &JobProfile, path: &Path) -> Result<FlatKeyStore> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let store = parse_sections(profile, &data)
        .with_context(|| {
            format!(
                "failed to parse config file {} (expected TOML sections with quoted string values)",
                path.display()
            )
        })?;
    tracing::debug!("loaded {} key(s) from {}", store.len(), path.display());
    Ok(store)
}

/// Each top-level table is one job, in file order.
///
/// ```toml
/// [scanners]
/// remote = "https://cif.example.org"
/// token = "..."
/// filename = "scanners.txt"
/// tags = "scanner"
/// ```
pub fn parse_sections(profile: &JobProfile, data: &str) -> Result<FlatKeyStore> {
    let table: Table = toml::from_str(data)?;
    let indices = profile.indexing.indices();
    let mut store = FlatKeyStore::new();
    let mut slot = 0usize;

    for (section, value) in table {
        let fields = match value {
            Value::Table(t) => t,
            _ => {
                tracing::warn!("ignoring top-level key `{}` outside any job section", section);
                continue;
            }
        };
        let Some(&index) = indices.get(slot) else {
            tracing::warn!(
                "ignoring job section [{}]: at most {} {} job(s) are supported",
                section,
                profile.indexing.max_jobs(),
                profile.name
            );
            continue;
        };
        slot += 1;

        let prefix = profile.prefix(index);
        for (field, value) in fields {
            match scalar(&value) {
                Some(v) => store.insert(&format!("{}{}", prefix, field), v),
                None => tracing::warn!("ignoring non-scalar field `{}` in [{}]", field, section),
            }
        }
    }
    Ok(store)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}
