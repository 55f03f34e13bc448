//! Run one job attempt: fetch-and-write or read-and-submit.
//!
//! Transport failures cost one jittered backoff wait and end the attempt;
//! nothing escapes [`RetryingExecutor::execute`] except an [`ExecutionOutcome`].

use std::path::Path;
use std::time::Duration;

use crate::client::{FeedClient, SafelistEntry, TransportError};
use crate::indicator::IndicatorType;
use crate::job::{JobMode, JobSpec};
use crate::retry::{BackoffPolicy, Sleeper};
use crate::sink;

/// Safelist entries per submit call.
pub const SUBMIT_CHUNK_SIZE: usize = 500;

/// Terminal status of one job attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    /// Skipped before any transport call (e.g. unsupported indicator type).
    Rejected(String),
    /// Transport failed; the attempt waited `backoff` and was abandoned.
    Exhausted { error: String, backoff: Duration },
    /// Local file could not be read or written.
    SinkFailed(String),
}

/// What happened to one job in one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub destination: String,
    /// Records written (download) or submitted (upload).
    pub records: usize,
    pub status: OutcomeStatus,
}

impl ExecutionOutcome {
    fn new(job: &JobSpec, records: usize, status: OutcomeStatus) -> Self {
        Self {
            destination: job.destination_name.clone(),
            records,
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Failed attempts make a single-pass run exit non-zero. Rejections do not.
    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            OutcomeStatus::Exhausted { .. } | OutcomeStatus::SinkFailed(_)
        )
    }
}

/// Executes jobs against a [`FeedClient`], sleeping through `sleeper`.
pub struct RetryingExecutor<'a> {
    client: &'a dyn FeedClient,
    sleeper: &'a dyn Sleeper,
    backoff: BackoffPolicy,
}

impl<'a> RetryingExecutor<'a> {
    pub fn new(client: &'a dyn FeedClient, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            client,
            sleeper,
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn execute(&self, job: &JobSpec) -> ExecutionOutcome {
        let outcome = match &job.mode {
            JobMode::Download { .. } => self.download(job),
            JobMode::Upload {
                group,
                indicator_type,
                ..
            } => self.upload(job, group, indicator_type),
        };
        tracing::debug!(destination = %outcome.destination, outcome = ?outcome.status, "job finished");
        outcome
    }

    fn download(&self, job: &JobSpec) -> ExecutionOutcome {
        tracing::debug!(filters = ?job.filters, "getting feed");
        let records = match self.client.fetch(&job.endpoint, &job.filters) {
            Ok(r) => r,
            Err(e) => return ExecutionOutcome::new(job, 0, self.back_off(job, &e)),
        };
        tracing::info!("retrieved {} items for feed {}", records.len(), job.destination_name);

        let path = job.destination_path();
        match sink::write_records(&path, &records) {
            Ok(()) => ExecutionOutcome::new(job, records.len(), OutcomeStatus::Success),
            Err(e) => {
                tracing::error!("could not write feed {}: {:#}", path.display(), e);
                ExecutionOutcome::new(job, 0, OutcomeStatus::SinkFailed(format!("{:#}", e)))
            }
        }
    }

    fn upload(&self, job: &JobSpec, group: &str, indicator_type: &str) -> ExecutionOutcome {
        let itype: IndicatorType = match indicator_type.parse() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("unable to process safelist {}: {}", job.destination_name, e);
                return ExecutionOutcome::new(job, 0, OutcomeStatus::Rejected(e.to_string()));
            }
        };

        let path = job.destination_path();
        let entries = match self.load_safelist(&path, itype, group) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("could not read safelist {}: {:#}", path.display(), e);
                return ExecutionOutcome::new(job, 0, OutcomeStatus::SinkFailed(format!("{:#}", e)));
            }
        };

        let mut submitted = 0;
        for (i, chunk) in entries.chunks(SUBMIT_CHUNK_SIZE).enumerate() {
            match self.client.submit(&job.endpoint, chunk) {
                Ok(status) => {
                    tracing::debug!(chunk = i + 1, accepted = ?status.accepted, "submitted chunk");
                    submitted += chunk.len();
                }
                Err(e) => return ExecutionOutcome::new(job, submitted, self.back_off(job, &e)),
            }
        }
        tracing::info!(
            "uploaded safelist {} with item count of {}",
            job.destination_name,
            submitted
        );
        ExecutionOutcome::new(job, submitted, OutcomeStatus::Success)
    }

    fn load_safelist(
        &self,
        path: &Path,
        itype: IndicatorType,
        group: &str,
    ) -> anyhow::Result<Vec<SafelistEntry>> {
        let mut entries = Vec::new();
        for candidate in sink::read_candidates(path)? {
            if itype.validate(&candidate) {
                entries.push(SafelistEntry::new(candidate, itype.as_str(), group));
            } else {
                tracing::warn!("rejected safelist candidate: {}", candidate);
            }
        }
        tracing::debug!("extracted {} safelist entries from {}", entries.len(), path.display());
        Ok(entries)
    }

    fn back_off(&self, job: &JobSpec, err: &TransportError) -> OutcomeStatus {
        let delay = self.backoff.sample();
        tracing::warn!(destination = %job.destination_name, "transport failure: {}", err);
        tracing::warn!("backing off {} seconds after failure", delay.as_secs());
        self.sleeper.sleep(delay);
        OutcomeStatus::Exhausted {
            error: err.to_string(),
            backoff: delay,
        }
    }
}
