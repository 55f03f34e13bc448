//! `chnfeed feed|safelist|intel`: aggregate jobs for a profile and drive the loop.

use anyhow::Result;
use chnfeed_core::client::FeedClient;
use chnfeed_core::config;
use chnfeed_core::executor::RetryingExecutor;
use chnfeed_core::job::{self, JobProfile};
use chnfeed_core::retry::ThreadSleeper;
use chnfeed_core::scheduler::{LoopExit, ScheduleOptions, SchedulerLoop};

use crate::cli::RunArgs;

pub fn run_jobs(profile: &JobProfile, client: &dyn FeedClient, args: &RunArgs) -> Result<LoopExit> {
    let store = config::load(profile, args.config.as_deref())?;
    let aggregation = job::aggregate(&store, profile);
    if !aggregation.rejected.is_empty() {
        tracing::info!(
            "{} {} config(s) ignored; see warnings above",
            aggregation.rejected.len(),
            profile.name
        );
    }

    let sleep = args.sleep.unwrap_or(profile.default_interval);
    tracing::debug!("requested refresh interval: {} {}", sleep, profile.interval_unit.label());
    let options = ScheduleOptions::new(
        args.refresh,
        profile.interval_unit.to_duration(sleep),
        profile.min_interval_duration(),
    )
    .with_max_cycles(args.cycles);

    let sleeper = ThreadSleeper;
    let executor = RetryingExecutor::new(client, &sleeper);
    let scheduler = SchedulerLoop::new(executor, &sleeper, options);
    Ok(scheduler.run(&aggregation.jobs))
}
