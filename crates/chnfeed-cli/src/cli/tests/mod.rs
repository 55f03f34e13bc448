//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::{CommandFactory, Parser};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_feed_defaults() {
    let cli = parse(&["chnfeed", "feed"]);
    assert!(!cli.debug);
    assert!(!cli.log_file);
    match cli.command {
        CliCommand::Feed(args) => {
            assert!(args.sleep.is_none());
            assert!(!args.refresh);
            assert!(args.config.is_none());
            assert!(args.cycles.is_none());
        }
        _ => panic!("expected Feed"),
    }
}

#[test]
fn cli_parse_safelist_short_flags() {
    let cli = parse(&["chnfeed", "safelist", "-s", "2", "-r", "-d"]);
    assert!(cli.debug);
    match cli.command {
        CliCommand::Safelist(args) => {
            assert_eq!(args.sleep, Some(2));
            assert!(args.refresh);
        }
        _ => panic!("expected Safelist"),
    }
}

#[test]
fn cli_parse_intel_with_config_and_cycles() {
    let cli = parse(&[
        "chnfeed",
        "--log-file",
        "intel",
        "--config",
        "/etc/chnfeed/intel.toml",
        "--refresh",
        "--cycles",
        "3",
    ]);
    assert!(cli.log_file);
    match cli.command {
        CliCommand::Intel(args) => {
            assert_eq!(
                args.config.as_deref(),
                Some(std::path::Path::new("/etc/chnfeed/intel.toml"))
            );
            assert_eq!(args.cycles, Some(3));
            assert!(args.refresh);
        }
        _ => panic!("expected Intel"),
    }
}

#[test]
fn cli_rejects_unknown_command_and_bad_sleep() {
    assert!(Cli::try_parse_from(["chnfeed", "purge"]).is_err());
    assert!(Cli::try_parse_from(["chnfeed", "feed", "-s", "soon"]).is_err());
    assert!(Cli::try_parse_from(["chnfeed"]).is_err());
}

#[test]
fn config_help_states_toml_format() {
    let mut cmd = Cli::command();
    for name in ["feed", "safelist", "intel"] {
        let sub = cmd.find_subcommand_mut(name).expect("subcommand");
        let help = sub.render_long_help().to_string();
        assert!(help.contains("TOML"), "{} help: {}", name, help);
        assert!(help.contains("quoted"), "{} help: {}", name, help);
    }
}
