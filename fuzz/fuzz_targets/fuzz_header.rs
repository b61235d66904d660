//! Fuzzes the record header parser in both byte orders.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_header

#![no_main]

use f1_telemetry::{decode_header, decode_header_big_endian};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    let _ = decode_header(data);
    let _ = decode_header_big_endian(data);
});
