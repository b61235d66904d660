//! Command implementations for the f1tel CLI

pub mod census;
pub mod decode;
pub mod record;

use std::fs::File;
use std::io::{self, BufReader};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use f1_telemetry::{ByteOrder, DecodeOptions};

use crate::error::CliError;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Framed telemetry log to decode
    pub input: PathBuf,

    /// Write the frame mapping here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Payloads are big-endian
    #[arg(long)]
    pub big_endian: bool,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CensusArgs {
    /// Framed telemetry log to inspect
    pub input: PathBuf,

    /// Headers are big-endian
    #[arg(long)]
    pub big_endian: bool,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// UDP port (overrides the port of --bind)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory for session logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long, hide = true)]
    pub duration: Option<u64>,
}

pub(crate) fn decode_options(big_endian: bool) -> DecodeOptions {
    DecodeOptions {
        byte_order: byte_order(big_endian),
    }
}

pub(crate) fn byte_order(big_endian: bool) -> ByteOrder {
    if big_endian {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    }
}

/// Open a log for reading, mapping a missing file to [`CliError::InputNotFound`].
pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CliError::InputNotFound(path.display().to_string()).into())
        }
        Err(e) => Err(e).with_context(|| format!("failed to open '{}'", path.display())),
    }
}
