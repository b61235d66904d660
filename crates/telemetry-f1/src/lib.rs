//! Decoder for F1 UDP telemetry logs.
//!
//! A log is a sequence of `u16`-length-prefixed records, each one UDP datagram
//! as sent by the game (24-byte header packet formats, 2021/2022). Records are
//! decoded independently through a [`PacketRegistry`], grouped by `frame_id` in
//! a [`FrameAggregator`] and reported as frame-ordered output plus
//! [`DecodeStats`].
//!
//! ```no_run
//! use f1_telemetry::{DecodeOptions, decode_stream};
//!
//! let file = std::fs::File::open("session.bin")?;
//! let report = decode_stream(std::io::BufReader::new(file), &DecodeOptions::default())?;
//! println!("{}", report.stats);
//! # Ok::<(), std::io::Error>(())
//! ```

#![deny(static_mut_refs)]

pub mod aggregator;
pub mod cursor;
pub mod error;
pub mod fixtures;
pub mod framing;
pub mod header;
pub mod packets;
pub mod pipeline;
pub mod protocol;
pub mod registry;
pub mod stats;

pub use aggregator::{FrameAggregator, FrameMap, FrameRecord};
pub use cursor::{ByteCursor, ByteOrder};
pub use error::{DecodeError, DecodeResult};
pub use framing::{FramedReader, FramedWriter};
pub use header::{RecordHeader, decode_header, decode_header_big_endian, parse_header};
pub use packets::{DecodedPacket, PacketData};
pub use pipeline::{
    DecodeOptions, DecodeReport, PacketCensus, StreamDecoder, census, decode_records,
    decode_stream,
};
pub use protocol::{DEFAULT_UDP_PORT, HEADER_SIZE, NUM_CARS, PacketKind};
pub use registry::{DecodeFn, PacketRegistry, decode_record};
pub use stats::DecodeStats;
