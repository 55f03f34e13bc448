//! Per-variant job profiles: namespace, indexing, direction and schedule floor.

use std::time::Duration;

/// Which way records flow for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Fetch records from the remote service and write them to a file.
    Download,
    /// Read candidates from a file and submit them to the remote service.
    Upload,
}

/// How job definitions are enumerated inside the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indexing {
    /// `<NS><i>_<FIELD>` for `i` in `0..max_jobs`.
    Numbered { max_jobs: usize },
    /// A single unindexed job: `<NS>_<FIELD>`.
    Single,
}

impl Indexing {
    /// Job indices in scan order (`None` for the single unindexed job).
    pub fn indices(self) -> Vec<Option<usize>> {
        match self {
            Indexing::Numbered { max_jobs } => (0..max_jobs).map(Some).collect(),
            Indexing::Single => vec![None],
        }
    }

    pub fn max_jobs(self) -> usize {
        match self {
            Indexing::Numbered { max_jobs } => max_jobs,
            Indexing::Single => 1,
        }
    }
}

/// Unit the `--sleep` value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Minutes,
    Hours,
}

impl IntervalUnit {
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            IntervalUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            IntervalUnit::Hours => Duration::from_secs(amount.saturating_mul(3600)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntervalUnit::Minutes => "minutes",
            IntervalUnit::Hours => "hours",
        }
    }
}

/// Static description of one job variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobProfile {
    /// Short name used in logs ("feed", "safelist", "intel").
    pub name: &'static str,
    /// Key namespace, upper case (e.g. `CHNFEED`).
    pub namespace: &'static str,
    pub indexing: Indexing,
    pub direction: Direction,
    /// Reject jobs whose filters lack a non-empty `tags` entry.
    pub require_tags: bool,
    /// Filters inserted when the job does not set them.
    pub default_filters: &'static [(&'static str, &'static str)],
    /// Default for `OUTPUT_PATH` (download) or `INPUT_PATH` (upload).
    pub default_dir: &'static str,
    pub interval_unit: IntervalUnit,
    /// Hard floor for the refresh interval, in `interval_unit`.
    pub min_interval: u64,
    /// Default refresh interval, in `interval_unit`.
    pub default_interval: u64,
}

/// CIF feeds written to local files.
pub const FEED: JobProfile = JobProfile {
    name: "feed",
    namespace: "CHNFEED",
    indexing: Indexing::Numbered { max_jobs: 10 },
    direction: Direction::Download,
    require_tags: true,
    default_filters: &[],
    default_dir: "./feeds",
    interval_unit: IntervalUnit::Minutes,
    min_interval: 5,
    default_interval: 60,
};

/// Local safelists submitted to CIF.
pub const SAFELIST: JobProfile = JobProfile {
    name: "safelist",
    namespace: "CHNSAFELIST",
    indexing: Indexing::Numbered { max_jobs: 5 },
    direction: Direction::Upload,
    require_tags: false,
    default_filters: &[],
    default_dir: "./",
    interval_unit: IntervalUnit::Hours,
    min_interval: 1,
    default_interval: 24,
};

/// CHN server intel feed written to a local file.
pub const INTEL: JobProfile = JobProfile {
    name: "intel",
    namespace: "CHNAPIFEED",
    indexing: Indexing::Single,
    direction: Direction::Download,
    require_tags: false,
    default_filters: &[("hours", "24"), ("limit", "1000")],
    default_dir: "./feeds",
    interval_unit: IntervalUnit::Minutes,
    min_interval: 5,
    default_interval: 60,
};

impl JobProfile {
    /// Key prefix for one job index, e.g. `CHNFEED3_` or `CHNAPIFEED_`.
    pub fn prefix(&self, index: Option<usize>) -> String {
        match index {
            Some(i) => format!("{}{}_", self.namespace, i),
            None => format!("{}_", self.namespace),
        }
    }

    pub fn min_interval_duration(&self) -> Duration {
        self.interval_unit.to_duration(self.min_interval)
    }
}
