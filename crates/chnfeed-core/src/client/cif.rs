//! CIF v3 REST client: `GET /feed` and `POST /indicators`.

use serde::Deserialize;
use serde_json::Value;

use super::error::TransportError;
use super::http;
use super::{FeedClient, Record, SafelistEntry, SubmitStatus};
use crate::job::{Endpoint, Filters};

const ACCEPT: &str = "application/vnd.cif.v3+json";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn parse(body: &[u8]) -> Result<Self, TransportError> {
        let env: Envelope = serde_json::from_slice(body)?;
        if env.status.as_deref() == Some("failed") {
            return Err(TransportError::Api(
                env.message.unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        Ok(env)
    }
}

/// Client for a CIF v3 instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CifClient;

impl CifClient {
    pub fn new() -> Self {
        Self
    }

    fn auth_header(endpoint: &Endpoint) -> String {
        format!("Token token={}", endpoint.token.expose())
    }
}

/// `data` is either an array of records or a string holding one.
fn decode_records(data: Value) -> Result<Vec<Record>, TransportError> {
    match data {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(serde_json::from_str(&s)?),
        other => Ok(serde_json::from_value(other)?),
    }
}

impl FeedClient for CifClient {
    fn fetch(&self, endpoint: &Endpoint, filters: &Filters) -> Result<Vec<Record>, TransportError> {
        let mut url = http::endpoint_url(&endpoint.remote, "feed")?;
        url.query_pairs_mut().extend_pairs(filters.iter());
        tracing::debug!(url = %url, "querying CIF feed");

        let auth = Self::auth_header(endpoint);
        let headers = [("Authorization", auth.as_str()), ("Accept", ACCEPT)];
        let resp = http::request(&url, &headers, None, endpoint.verify_tls)?;
        tracing::debug!(code = resp.code, bytes = resp.body.len(), "CIF feed response");

        decode_records(Envelope::parse(&resp.body)?.data)
    }

    fn submit(
        &self,
        endpoint: &Endpoint,
        batch: &[SafelistEntry],
    ) -> Result<SubmitStatus, TransportError> {
        let url = http::endpoint_url(&endpoint.remote, "indicators")?;
        let body = serde_json::to_vec(batch)?;

        let auth = Self::auth_header(endpoint);
        let headers = [("Authorization", auth.as_str()), ("Accept", ACCEPT)];
        let resp = http::request(&url, &headers, Some(&body), endpoint.verify_tls)?;

        let accepted = if resp.body.is_empty() {
            None
        } else {
            Envelope::parse(&resp.body)?.data.as_u64()
        };
        Ok(SubmitStatus { accepted })
    }
}
