use std::time::Duration;

use super::interval::effective_interval;
use crate::executor::{ExecutionOutcome, RetryingExecutor};
use crate::job::JobSet;
use crate::retry::Sleeper;

/// Wait before exiting when no valid job was configured, so a supervisor does
/// not restart the process in a tight loop.
pub const EMPTY_JOBSET_COOLDOWN: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Repeat cycles instead of exiting after the first.
    pub refresh: bool,
    /// Sleep between cycles, already clamped to the profile floor.
    pub interval: Duration,
    pub cooldown: Duration,
    /// Stop after this many cycles in refresh mode (`None` = forever).
    pub max_cycles: Option<u32>,
}

impl ScheduleOptions {
    pub fn new(refresh: bool, requested: Duration, floor: Duration) -> Self {
        let (interval, _) = effective_interval(requested, floor);
        Self {
            refresh,
            interval,
            cooldown: EMPTY_JOBSET_COOLDOWN,
            max_cycles: None,
        }
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<u32>) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Completed,
    /// Single pass finished but at least one job failed.
    Failed,
    /// Aggregation produced no valid jobs.
    NoJobs,
}

impl LoopExit {
    pub fn exit_code(self) -> i32 {
        match self {
            LoopExit::Completed => 0,
            LoopExit::Failed | LoopExit::NoJobs => 1,
        }
    }
}

/// Outcomes of one pass over the job set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub outcomes: Vec<ExecutionOutcome>,
}

impl CycleReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(ExecutionOutcome::is_failure)
    }

    pub fn total_records(&self) -> usize {
        self.outcomes.iter().map(|o| o.records).sum()
    }
}

pub struct SchedulerLoop<'a> {
    executor: RetryingExecutor<'a>,
    sleeper: &'a dyn Sleeper,
    options: ScheduleOptions,
}

impl<'a> SchedulerLoop<'a> {
    pub fn new(
        executor: RetryingExecutor<'a>,
        sleeper: &'a dyn Sleeper,
        options: ScheduleOptions,
    ) -> Self {
        Self {
            executor,
            sleeper,
            options,
        }
    }

    /// Execute every job once, in job-set order.
    pub fn run_cycle(&self, jobs: &JobSet) -> CycleReport {
        let outcomes = jobs
            .iter()
            .map(|(name, job)| {
                tracing::info!("processing {}", name);
                self.executor.execute(job)
            })
            .collect();
        CycleReport { outcomes }
    }

    pub fn run(&self, jobs: &JobSet) -> LoopExit {
        if jobs.is_empty() {
            tracing::error!(
                "found no valid jobs; check the configuration. Exiting in {} seconds",
                self.options.cooldown.as_secs()
            );
            self.sleeper.sleep(self.options.cooldown);
            return LoopExit::NoJobs;
        }

        let mut cycles = 0u32;
        loop {
            let report = self.run_cycle(jobs);
            cycles = cycles.saturating_add(1);

            if !self.options.refresh {
                tracing::info!(
                    records = report.total_records(),
                    "finished processing jobs, exiting"
                );
                return if report.has_failures() {
                    LoopExit::Failed
                } else {
                    LoopExit::Completed
                };
            }
            if self.options.max_cycles.map_or(false, |max| cycles >= max) {
                tracing::info!("completed {} cycle(s), exiting", cycles);
                return LoopExit::Completed;
            }

            tracing::info!(
                "finished processing jobs, sleeping for {} seconds",
                self.options.interval.as_secs()
            );
            self.sleeper.sleep(self.options.interval);
        }
    }
}
