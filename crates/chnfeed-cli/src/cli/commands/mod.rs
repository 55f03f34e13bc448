//! CLI command handlers.

mod run;

pub use run::run_jobs;
