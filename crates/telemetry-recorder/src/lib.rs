//! Live capture of F1 UDP telemetry into framed session logs.
//!
//! [`run_logger`] listens on a UDP socket, waits for the first Session packet
//! to learn the track, then appends every datagram to
//! `<log_dir>/<Track>_<YYYY-MM-DD_HH-MM-SS>.bin` using the framing that
//! [`f1_telemetry::FramedReader`] reads back.

pub mod config;
pub mod logger;
pub mod tracks;

pub use config::RecorderConfig;
pub use logger::{LoggerSummary, PacketLogger, run_logger};
pub use tracks::{log_file_name, log_file_stem, track_name};
