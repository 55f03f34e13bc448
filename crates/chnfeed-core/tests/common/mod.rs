//! Shared fixtures: in-memory feed client, recording sleeper, job builders.

#![allow(dead_code)]

pub mod feed_server;

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::time::Duration;

use chnfeed_core::client::{FeedClient, Record, SafelistEntry, SubmitStatus, TransportError};
use chnfeed_core::job::{Endpoint, Filters, JobMode, JobSpec, Token};
use chnfeed_core::retry::Sleeper;
use url::Url;

/// Records every wait instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

impl RecordingSleeper {
    pub fn waits(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

/// Scripted client: returns `records` on fetch, fails when asked to.
#[derive(Default)]
pub struct FakeClient {
    pub records: Vec<Record>,
    pub fail_fetch: bool,
    /// 0-based submit call that fails.
    pub fail_submit_at: Option<usize>,
    pub fetches: Cell<usize>,
    pub batches: RefCell<Vec<Vec<SafelistEntry>>>,
}

impl FakeClient {
    pub fn returning(indicators: &[&str]) -> Self {
        Self {
            records: indicators.iter().map(|s| Record::new(*s)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.borrow().iter().map(Vec::len).collect()
    }
}

impl FeedClient for FakeClient {
    fn fetch(&self, _: &Endpoint, _: &Filters) -> Result<Vec<Record>, TransportError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail_fetch {
            return Err(TransportError::Http(503));
        }
        Ok(self.records.clone())
    }

    fn submit(&self, _: &Endpoint, batch: &[SafelistEntry]) -> Result<SubmitStatus, TransportError> {
        let call = self.batches.borrow().len();
        if self.fail_submit_at == Some(call) {
            return Err(TransportError::Api("rejected".into()));
        }
        self.batches.borrow_mut().push(batch.to_vec());
        Ok(SubmitStatus {
            accepted: Some(batch.len() as u64),
        })
    }
}

pub fn endpoint(remote: &str) -> Endpoint {
    Endpoint {
        remote: Url::parse(remote).unwrap(),
        token: Token::new("tok"),
        verify_tls: false,
    }
}

pub fn download_job(dir: &Path, name: &str) -> JobSpec {
    let mut filters = Filters::new();
    filters.insert("tags".into(), "scanner".into());
    JobSpec {
        endpoint: endpoint("https://cif.example.org"),
        destination_name: name.into(),
        filters,
        mode: JobMode::Download {
            output_path: dir.to_path_buf(),
        },
    }
}

pub fn upload_job(dir: &Path, name: &str, itype: &str) -> JobSpec {
    JobSpec {
        endpoint: endpoint("https://cif.example.org"),
        destination_name: name.into(),
        filters: Filters::new(),
        mode: JobMode::Upload {
            input_path: dir.to_path_buf(),
            group: "acme".into(),
            indicator_type: itype.into(),
        },
    }
}

/// `n` distinct IPv4 addresses.
pub fn ipv4_lines(n: usize) -> String {
    (0..n)
        .map(|i| format!("10.{}.{}.{}\n", (i >> 16) & 0xff, (i >> 8) & 0xff, i & 0xff))
        .collect()
}
