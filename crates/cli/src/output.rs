//! Output formatting for CLI responses

use std::io::Write;

use anyhow::Error;
use colored::*;
use f1_telemetry::{DecodeStats, PacketCensus};
use f1_telemetry_recorder::LoggerSummary;
use serde::Serialize;
use serde_json::json;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "chain": error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

/// Where a command summary goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stdout,
    Stderr,
}

fn emit(channel: Channel, text: &str) {
    match channel {
        Channel::Stdout => println!("{}", text),
        Channel::Stderr => eprintln!("{}", text),
    }
}

fn emit_json<T: Serialize>(channel: Channel, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => emit(channel, &s),
        Err(e) => eprintln!("Failed to format summary as JSON: {}", e),
    }
}

/// Serialize `value` as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(
    mut writer: W,
    value: &T,
    compact: bool,
) -> std::io::Result<()> {
    if compact {
        serde_json::to_writer(&mut writer, value)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()
}

#[derive(Serialize)]
struct DecodeSummary<'a> {
    success: bool,
    input: &'a str,
    output: Option<&'a str>,
    stats: &'a DecodeStats,
}

/// Print the result of a decode run
pub fn print_decode_summary(
    input: &str,
    output: Option<&str>,
    stats: &DecodeStats,
    json: bool,
    channel: Channel,
) {
    if json {
        emit_json(
            channel,
            &DecodeSummary {
                success: true,
                input,
                output,
                stats,
            },
        );
        return;
    }

    emit(channel, &format!("{} {}", "Decoded".green().bold(), input));
    emit(channel, &format!("  {}", stats));
    for (kind, count) in &stats.decoded {
        emit(channel, &format!("  {:<22} {}", kind.name(), count));
    }
    if let Some(path) = output {
        emit(channel, &format!("  output: {}", path));
    }
}

#[derive(Serialize)]
struct CensusRow {
    packet_type: u8,
    kind: Option<&'static str>,
    count: u64,
}

/// Print a packet type histogram
pub fn print_census(input: &str, census: &PacketCensus, json: bool) {
    let rows: Vec<CensusRow> = census
        .rows()
        .map(|(packet_type, kind, count)| CensusRow {
            packet_type,
            kind,
            count,
        })
        .collect();

    if json {
        let output = json!({
            "success": true,
            "input": input,
            "total_records": census.total_records,
            "too_short": census.too_short,
            "packet_types": rows,
        });
        emit_json(Channel::Stdout, &output);
        return;
    }

    println!("{} {}", "Packet census:".bold(), input);
    println!("  records: {}", census.total_records);
    if census.too_short > 0 {
        println!("  {} {}", "too short:".yellow(), census.too_short);
    }
    for row in &rows {
        let name = row.kind.unwrap_or("unknown");
        println!("  {:>3}  {:<22} {}", row.packet_type, name, row.count);
    }
}

/// Print the live logger summary
pub fn print_logger_summary(summary: &LoggerSummary, json: bool) {
    if json {
        emit_json(Channel::Stdout, summary);
        return;
    }

    println!("Telemetry logging stopped");
    println!("  datagrams: {}", summary.datagrams_seen);
    println!("  dropped before session: {}", summary.datagrams_dropped);
    println!("  records_written: {}", summary.records_written);
    println!("  bytes_written: {}", summary.bytes_written);
    match &summary.log_file {
        Some(path) => println!("  output: {}", path.display()),
        None => println!("  {}", "no session packet received, nothing written".yellow()),
    }
}
