//! Fuzzes the framed log reader and the full decode pipeline.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_framed_stream

#![no_main]

use f1_telemetry::{ByteOrder, DecodeOptions, census, decode_stream};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_stream(data, &DecodeOptions::default());
    let _ = census(data, ByteOrder::LittleEndian);
});
