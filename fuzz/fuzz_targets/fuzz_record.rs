//! Fuzzes header parsing plus dispatch to every packet decoder.
//!
//! The first input byte overrides the packet type so every decoder is reached.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_record

#![no_main]

use f1_telemetry::{ByteOrder, PacketRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((selector, rest)) = data.split_first() else {
        return;
    };
    let mut record = rest.to_vec();
    if let Some(kind) = record.get_mut(5) {
        *kind = selector % 13;
    }
    let registry = PacketRegistry::standard();
    let _ = registry.decode_record(&record, ByteOrder::LittleEndian);
    let _ = registry.decode_record(&record, ByteOrder::BigEndian);
});
