//! CLI for the CHN feed and safelist poller.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use chnfeed_core::client::{ChnIntelClient, CifClient};
use chnfeed_core::job::profile;
use chnfeed_core::scheduler::LoopExit;
use std::path::PathBuf;

use commands::run_jobs;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "chnfeed")]
#[command(
    about = "Collect threat-intelligence feeds into files, or submit local safelists, then refresh",
    long_about = None
)]
pub struct Cli {
    /// Get debug messages about processing.
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Log to ~/.local/state/chnfeed/chnfeed.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download CIF feeds (CHNFEED<i>_* keys) into local files.
    Feed(RunArgs),

    /// Submit local safelist files (CHNSAFELIST<i>_* keys) to CIF.
    Safelist(RunArgs),

    /// Download the CHN server intel feed (CHNAPIFEED_* keys) into a local file.
    Intel(RunArgs),
}

/// Options shared by every job command.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Time between refreshes: minutes for feed/intel (minimum 5, default 60),
    /// hours for safelist (minimum 1, default 24).
    #[arg(short, long, value_name = "N")]
    pub sleep: Option<u64>,

    /// Keep refreshing every --sleep interval instead of exiting after one pass.
    #[arg(short, long)]
    pub refresh: bool,

    /// Read job sections from a TOML file instead of the environment.
    ///
    /// One `[section]` per job with `key = "value"` pairs; string values must
    /// be quoted (`remote = "https://cif.example.org"`).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// With --refresh, stop after N cycles.
    #[arg(long, value_name = "N")]
    pub cycles: Option<u32>,
}

impl Cli {
    pub fn run(self) -> Result<LoopExit> {
        match self.command {
            CliCommand::Feed(args) => run_jobs(&profile::FEED, &CifClient::new(), &args),
            CliCommand::Safelist(args) => run_jobs(&profile::SAFELIST, &CifClient::new(), &args),
            CliCommand::Intel(args) => run_jobs(&profile::INTEL, &ChnIntelClient::new(), &args),
        }
    }
}

#[cfg(test)]
mod tests;
