//! Decode a framed log into frame-ordered JSON.

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use f1_telemetry::decode_stream;
use tracing::debug;

use crate::commands::{DecodeArgs, decode_options, open_input};
use crate::error::CliError;
use crate::output::{self, Channel};

pub fn execute(args: &DecodeArgs, json: bool) -> Result<()> {
    let input = args.input.display().to_string();
    let reader = open_input(&args.input)?;
    let options = decode_options(args.big_endian);
    debug!(%input, byte_order = ?options.byte_order, "decoding log");

    let report = decode_stream(reader, &options)
        .with_context(|| format!("failed to read telemetry log '{}'", input))?;
    let frames = report.frame_map();

    match &args.output {
        Some(path) => {
            let shown = path.display().to_string();
            let file = File::create(path)
                .map_err(|e| CliError::OutputWrite(format!("'{}': {}", shown, e)))?;
            output::write_json(BufWriter::new(file), &frames, args.compact)
                .map_err(|e| CliError::OutputWrite(format!("'{}': {}", shown, e)))?;
            output::print_decode_summary(
                &input,
                Some(shown.as_str()),
                &report.stats,
                json,
                Channel::Stdout,
            );
        }
        None => {
            output::write_json(io::stdout().lock(), &frames, args.compact)
                .map_err(|e| CliError::OutputWrite(format!("to stdout: {}", e)))?;
            output::print_decode_summary(&input, None, &report.stats, json, Channel::Stderr);
        }
    }
    Ok(())
}
