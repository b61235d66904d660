//! f1tel - F1 telemetry log tools
//!
//! Decodes length-prefixed telemetry logs into frame-ordered JSON, prints
//! packet type histograms and records live sessions from the game's UDP feed.

#![deny(static_mut_refs)]

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CensusArgs, DecodeArgs, RecordArgs};

#[derive(Parser)]
#[command(name = "f1tel")]
#[command(about = "F1 UDP telemetry tools - decode, inspect and record session logs")]
#[command(version)]
#[command(long_about = "
f1tel works with telemetry logs made of u16-length-prefixed UDP datagrams as
sent by the F1 games (24-byte header formats).

Use --json for machine-readable summaries. Log verbosity follows -v or RUST_LOG.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(long, global = true, help = "Print summaries as JSON")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a log into frame-ordered JSON
    Decode(DecodeArgs),

    /// Count packet types in a log without decoding payloads
    Census(CensusArgs),

    /// Record live telemetry until Ctrl-C
    Record(RecordArgs),
}

fn log_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("f1tel={level},f1_telemetry={level},f1_telemetry_recorder={level}")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(cli.verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Decode(args) => commands::decode::execute(args, cli.json),
        Commands::Census(args) => commands::census::execute(args, cli.json),
        Commands::Record(args) => commands::record::execute(args, cli.json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_decode_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel", "decode", "session.bin"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        let Commands::Decode(args) = cli.command else {
            return Err("expected decode".into());
        };
        assert_eq!(args.input, PathBuf::from("session.bin"));
        assert!(args.output.is_none());
        assert!(!args.big_endian);
        assert!(!args.compact);
        Ok(())
    }

    #[test]
    fn parse_decode_all_flags() -> TestResult {
        let cli = Cli::try_parse_from([
            "f1tel",
            "decode",
            "in.bin",
            "-o",
            "out.json",
            "--big-endian",
            "--compact",
        ])?;
        let Commands::Decode(args) = cli.command else {
            return Err("expected decode".into());
        };
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.big_endian);
        assert!(args.compact);
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel", "census", "in.bin", "--json", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Census(_)));
        Ok(())
    }

    #[test]
    fn parse_record_overrides() -> TestResult {
        let cli = Cli::try_parse_from([
            "f1tel",
            "record",
            "--bind",
            "0.0.0.0:20777",
            "--port",
            "20778",
            "--log-dir",
            "logs",
        ])?;
        let Commands::Record(args) = cli.command else {
            return Err("expected record".into());
        };
        assert_eq!(args.bind.map(|a| a.to_string()), Some("0.0.0.0:20777".to_string()));
        assert_eq!(args.port, Some(20778));
        assert_eq!(args.log_dir, Some(PathBuf::from("logs")));
        Ok(())
    }

    #[test]
    fn parse_rejects_bad_bind_address() {
        let result = Cli::try_parse_from(["f1tel", "record", "--bind", "localhost"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_requires_input() {
        assert!(Cli::try_parse_from(["f1tel", "decode"]).is_err());
    }

    #[test]
    fn verbosity_sets_filter_level() {
        assert_eq!(
            log_filter(0),
            "f1tel=warn,f1_telemetry=warn,f1_telemetry_recorder=warn"
        );
        assert!(log_filter(2).starts_with("f1tel=debug"));
        assert!(log_filter(9).starts_with("f1tel=trace"));
    }
}
