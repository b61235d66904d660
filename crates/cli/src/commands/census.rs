//! Packet type histogram of a log.

use anyhow::{Context, Result};
use f1_telemetry::census;

use crate::commands::{CensusArgs, byte_order, open_input};
use crate::output;

pub fn execute(args: &CensusArgs, json: bool) -> Result<()> {
    let input = args.input.display().to_string();
    let reader = open_input(&args.input)?;
    let census = census(reader, byte_order(args.big_endian))
        .with_context(|| format!("failed to read telemetry log '{}'", input))?;
    output::print_census(&input, &census, json);
    Ok(())
}
