use clap::Parser;
use chnfeed_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging(cli.debug, cli.log_file) {
        eprintln!("chnfeed: logging disabled: {:#}", err);
    }

    match cli.run() {
        Ok(exit) => std::process::exit(exit.exit_code()),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("chnfeed error: {:#}", err);
            std::process::exit(1);
        }
    }
}
