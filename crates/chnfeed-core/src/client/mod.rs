//! Remote feed service clients.
//!
//! The executor only sees the [`FeedClient`] trait. Concrete clients use the
//! curl crate (libcurl) with blocking `Easy` handles.

mod chn;
mod cif;
mod error;
mod http;

pub use chn::ChnIntelClient;
pub use cif::CifClient;
pub use error::TransportError;

use serde::{Deserialize, Serialize};

use crate::job::{Endpoint, Filters};

/// One record returned by a feed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub indicator: String,
}

impl Record {
    pub fn new(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
        }
    }
}

/// Safelist entry as submitted to the feed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafelistEntry {
    pub indicator: String,
    pub tags: String,
    pub itype: String,
    pub confidence: u8,
    pub group: String,
    pub provider: String,
}

impl SafelistEntry {
    /// Tag applied to every submitted safelist entry.
    pub const TAG: &'static str = "whitelist";
    pub const CONFIDENCE: u8 = 5;

    pub fn new(indicator: impl Into<String>, itype: &str, group: &str) -> Self {
        Self {
            indicator: indicator.into(),
            tags: Self::TAG.to_string(),
            itype: itype.to_string(),
            confidence: Self::CONFIDENCE,
            group: group.to_string(),
            provider: group.to_string(),
        }
    }
}

/// Server response to one submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitStatus {
    /// Number of indicators the server reported as created, if it said.
    pub accepted: Option<u64>,
}

/// Transport to the remote feed service.
pub trait FeedClient {
    /// Query records matching `filters`.
    fn fetch(&self, endpoint: &Endpoint, filters: &Filters) -> Result<Vec<Record>, TransportError>;

    /// Submit one batch of safelist entries.
    fn submit(
        &self,
        endpoint: &Endpoint,
        batch: &[SafelistEntry],
    ) -> Result<SubmitStatus, TransportError>;
}
