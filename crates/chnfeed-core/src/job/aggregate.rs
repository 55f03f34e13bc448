//! One aggregation pass: extract, validate and collect jobs by destination.

use std::collections::BTreeMap;

use super::extract::JobExtractor;
use super::profile::JobProfile;
use super::validate::{ConfigError, JobValidator};
use super::JobSet;
use crate::keystore::FlatKeyStore;

/// A job definition that was dropped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: Option<usize>,
    pub error: ConfigError,
}

/// Two jobs that computed the same destination name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub destination: String,
    /// Index of the job that was dropped.
    pub replaced: Option<usize>,
    /// Index of the job that took its place.
    pub kept: Option<usize>,
}

/// Result of an aggregation pass.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub jobs: JobSet,
    pub rejected: Vec<Rejection>,
    /// Destinations claimed by more than one job (the later index won).
    pub collisions: Vec<Collision>,
}

/// Discover every job in `store` for `profile`.
///
/// Invalid definitions are logged and recorded in [`Aggregation::rejected`];
/// they never abort the pass. A later job with the same destination name
/// replaces an earlier one.
pub fn aggregate(store: &FlatKeyStore, profile: &JobProfile) -> Aggregation {
    let validator = JobValidator::new(profile);
    let mut out = Aggregation::default();
    let mut owners: BTreeMap<String, Option<usize>> = BTreeMap::new();

    for fields in JobExtractor::for_profile(store, profile) {
        let index = fields.index();
        let label = fields.label();
        match validator.validate(fields) {
            Ok(job) => {
                if !job.verify_tls() {
                    tracing::warn!(
                        index = %label,
                        destination = %job.destination_name,
                        "TLS certificate verification is disabled; set TLS_VERIFY=true to enable"
                    );
                }
                tracing::debug!(index = %label, job = ?job, "adding {} job", profile.name);
                let name = job.destination_name.clone();
                out.jobs.insert(name.clone(), job);
                if let Some(replaced) = owners.insert(name.clone(), index) {
                    tracing::warn!(
                        destination = %name,
                        "job {} replaces job {} with the same destination",
                        label,
                        index_label(replaced)
                    );
                    out.collisions.push(Collision {
                        destination: name,
                        replaced,
                        kept: index,
                    });
                }
            }
            Err(error) => {
                tracing::warn!(index = %label, "ignoring {} config: {}", profile.name, error);
                out.rejected.push(Rejection { index, error });
            }
        }
    }

    tracing::debug!("after parsing there are {} valid {} job(s)", out.jobs.len(), profile.name);
    out
}

fn index_label(index: Option<usize>) -> String {
    index.map_or_else(|| "single".to_string(), |i| i.to_string())
}
