//! Job definitions: discovery from a flat key store, validation and the
//! immutable job descriptors the executor runs.

mod aggregate;
mod extract;
pub mod profile;
mod validate;

pub use aggregate::{aggregate, Aggregation, Collision, Rejection};
pub use extract::{JobExtractor, RawFieldSet};
pub use profile::{Direction, Indexing, IntervalUnit, JobProfile};
pub use validate::{ConfigError, JobValidator, FILTER_WHITELIST};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Whitelisted query filters, keyed by lower-case filter name.
pub type Filters = BTreeMap<String, String>;

/// Valid jobs keyed by destination name.
pub type JobSet = BTreeMap<String, JobSpec>;

/// API token. `Debug` and `Display` never print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Where and how to reach the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub remote: Url,
    pub token: Token,
    pub verify_tls: bool,
}

/// Direction-specific part of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobMode {
    Download {
        output_path: PathBuf,
    },
    Upload {
        input_path: PathBuf,
        /// CIF group (and provider) the safelist entries are submitted to.
        group: String,
        /// Configured indicator type; resolved to a validator at execution.
        indicator_type: String,
    },
}

/// Immutable, fully validated job descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub endpoint: Endpoint,
    /// File name written to (download) or read from (upload).
    pub destination_name: String,
    pub filters: Filters,
    pub mode: JobMode,
}

impl JobSpec {
    pub fn remote(&self) -> &Url {
        &self.endpoint.remote
    }

    pub fn verify_tls(&self) -> bool {
        self.endpoint.verify_tls
    }

    pub fn direction(&self) -> Direction {
        match self.mode {
            JobMode::Download { .. } => Direction::Download,
            JobMode::Upload { .. } => Direction::Upload,
        }
    }

    fn directory(&self) -> &Path {
        match &self.mode {
            JobMode::Download { output_path } => output_path,
            JobMode::Upload { input_path, .. } => input_path,
        }
    }

    /// `<configured directory>/<destination name>`.
    pub fn destination_path(&self) -> PathBuf {
        self.directory().join(&self.destination_name)
    }
}
