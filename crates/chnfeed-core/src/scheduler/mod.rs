//! Outer driver: run every job once per cycle, then exit or sleep and repeat.

mod interval;
mod run;

pub use interval::effective_interval;
pub use run::{CycleReport, LoopExit, ScheduleOptions, SchedulerLoop, EMPTY_JOBSET_COOLDOWN};
