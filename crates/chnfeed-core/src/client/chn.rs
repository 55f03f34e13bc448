//! CHN server intel feed client (`GET /api/intel_feed/`).

use serde::Deserialize;
use std::collections::HashSet;

use super::error::TransportError;
use super::http;
use super::{FeedClient, Record, SafelistEntry, SubmitStatus};
use crate::job::{Endpoint, Filters};

#[derive(Debug, Deserialize)]
struct IntelFeed {
    #[serde(default)]
    data: Vec<IntelEntry>,
}

#[derive(Debug, Deserialize)]
struct IntelEntry {
    source_ip: String,
}

/// Query parameters the intel endpoint understands, mapped from job filters.
const PARAMS: &[(&str, &str)] = &[("hours", "hours_ago"), ("limit", "limit")];

#[derive(Debug, Clone, Copy, Default)]
pub struct ChnIntelClient;

impl ChnIntelClient {
    pub fn new() -> Self {
        Self
    }
}

/// Source IPs in first-seen order, duplicates removed.
fn unique_sources(feed: IntelFeed) -> Vec<Record> {
    let mut seen = HashSet::new();
    feed.data
        .into_iter()
        .filter(|e| seen.insert(e.source_ip.clone()))
        .map(|e| Record::new(e.source_ip))
        .collect()
}

impl FeedClient for ChnIntelClient {
    fn fetch(&self, endpoint: &Endpoint, filters: &Filters) -> Result<Vec<Record>, TransportError> {
        let mut url = http::endpoint_url(&endpoint.remote, "api/intel_feed/")?;
        {
            let mut q = url.query_pairs_mut();
            for (filter, param) in PARAMS {
                if let Some(v) = filters.get(*filter) {
                    q.append_pair(param, v);
                }
            }
        }
        tracing::debug!(url = %url, "querying CHN intel feed");

        let headers = [("apikey", endpoint.token.expose())];
        let resp = http::request(&url, &headers, None, endpoint.verify_tls)?;
        let feed: IntelFeed = serde_json::from_slice(&resp.body)?;
        let records = unique_sources(feed);
        tracing::info!("received {} unique entries from server", records.len());
        Ok(records)
    }

    fn submit(&self, _: &Endpoint, _: &[SafelistEntry]) -> Result<SubmitStatus, TransportError> {
        Err(TransportError::Unsupported("the CHN intel feed"))
    }
}
