//! End-to-end decoding of a framed log.

use std::collections::BTreeMap;
use std::io::{self, Read};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregator::{FrameAggregator, FrameMap, FrameRecord};
use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::DecodeError;
use crate::framing::FramedReader;
use crate::header::parse_header;
use crate::packets::DecodedPacket;
use crate::protocol::PacketKind;
use crate::registry::PacketRegistry;
use crate::stats::DecodeStats;

/// Knobs for a decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub byte_order: ByteOrder,
}

impl DecodeOptions {
    pub fn big_endian() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
        }
    }
}

/// Result of decoding a whole log.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    /// Frames in ascending `frame_id` order.
    pub frames: Vec<(u32, FrameRecord)>,
    pub stats: DecodeStats,
}

impl DecodeReport {
    /// JSON-serialisable `{ "<frame_id>": { "<kind>": packet } }` view.
    pub fn frame_map(&self) -> FrameMap<'_> {
        FrameMap(&self.frames)
    }
}

/// Incremental decoder: feed records one at a time, then finish.
#[derive(Debug, Clone)]
pub struct StreamDecoder {
    registry: PacketRegistry,
    order: ByteOrder,
    aggregator: FrameAggregator<DecodedPacket>,
    stats: DecodeStats,
}

impl StreamDecoder {
    pub fn new(options: &DecodeOptions) -> Self {
        Self {
            registry: PacketRegistry::standard(),
            order: options.byte_order,
            aggregator: FrameAggregator::new(),
            stats: DecodeStats::default(),
        }
    }

    /// Decode one record and file it. Returns the kind on success; failures
    /// are counted and otherwise ignored.
    pub fn feed(&mut self, raw: &[u8]) -> Option<PacketKind> {
        match self.registry.decode_record(raw, self.order) {
            Ok(packet) => {
                let kind = packet.kind();
                self.stats.record_decoded(kind);
                self.aggregator.push(packet);
                Some(kind)
            }
            Err(err) => {
                if err.is_malformed() {
                    debug!(error = %err, len = raw.len(), "skipping malformed record");
                } else if let DecodeError::UnknownPacketType(id) = err {
                    debug!(packet_type = id, "skipping unknown packet type");
                }
                self.stats.record_error(&err);
                None
            }
        }
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    pub fn finish(self) -> DecodeReport {
        let mut stats = self.stats;
        let frames = self.aggregator.finish();
        stats.frames_aggregated = frames.len() as u64;
        info!(%stats, "decode finished");
        DecodeReport { frames, stats }
    }
}

/// Decode an in-memory set of records.
pub fn decode_records<I, R>(records: I, options: &DecodeOptions) -> DecodeReport
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut decoder = StreamDecoder::new(options);
    for record in records {
        decoder.feed(record.as_ref());
    }
    decoder.finish()
}

/// Decode every record of a framed log.
///
/// # Errors
///
/// Returns the first I/O error raised by `reader`. A truncated trailing record
/// is not an error.
pub fn decode_stream<R: Read>(reader: R, options: &DecodeOptions) -> io::Result<DecodeReport> {
    let mut decoder = StreamDecoder::new(options);
    for record in FramedReader::new(reader) {
        let record = record.inspect_err(|e| warn!(error = %e, "log read failed"))?;
        decoder.feed(&record);
    }
    Ok(decoder.finish())
}

/// Packet type histogram of a log, read from headers only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PacketCensus {
    pub total_records: u64,
    /// Records shorter than a header.
    pub too_short: u64,
    /// Count per raw packet type, unknown ids included.
    pub by_type: BTreeMap<u8, u64>,
}

impl PacketCensus {
    pub fn record(&mut self, raw: &[u8], order: ByteOrder) {
        self.total_records += 1;
        match parse_header(&ByteCursor::new(raw, order)) {
            Ok(header) => *self.by_type.entry(header.packet_type).or_insert(0) += 1,
            Err(_) => self.too_short += 1,
        }
    }

    pub fn count(&self, packet_type: u8) -> u64 {
        self.by_type.get(&packet_type).copied().unwrap_or(0)
    }

    /// Entries as `(id, kind name or None, count)`.
    pub fn rows(&self) -> impl Iterator<Item = (u8, Option<&'static str>, u64)> + '_ {
        self.by_type
            .iter()
            .map(|(id, n)| (*id, PacketKind::from_id(*id).map(PacketKind::name), *n))
    }
}

/// Count packet types in a framed log without decoding payloads.
///
/// # Errors
///
/// Returns the first I/O error raised by `reader`.
pub fn census<R: Read>(reader: R, order: ByteOrder) -> io::Result<PacketCensus> {
    let mut census = PacketCensus::default();
    for record in FramedReader::new(reader) {
        census.record(&record?, order);
    }
    info!(
        records = census.total_records,
        types = census.by_type.len(),
        "census finished"
    );
    Ok(census)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{HeaderSpec, RecordBuilder, encode_car_telemetry, encode_motion, framed};
    use crate::packets::{CarTelemetryData, MotionData};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn unknown_type_is_counted_not_aggregated() {
        let unknown = RecordBuilder::sized(&HeaderSpec::default().for_frame(99, 4), 64).build();
        let report = decode_records([unknown], &DecodeOptions::default());
        assert_eq!(report.stats.records_observed, 1);
        assert_eq!(report.stats.unknown_packet_types, 1);
        assert!(report.frames.is_empty());
    }

    #[test]
    fn stream_and_records_agree() -> TestResult {
        let base = HeaderSpec::default();
        let records = vec![
            encode_motion(&base.for_frame(0, 2), &MotionData::default()),
            encode_car_telemetry(&base.for_frame(6, 2), &CarTelemetryData::default()),
            encode_motion(&base.for_frame(0, 1), &MotionData::default()),
        ];
        let from_stream = decode_stream(framed(&records).as_slice(), &DecodeOptions::default())?;
        let from_records = decode_records(&records, &DecodeOptions::default());
        assert_eq!(from_stream.stats, from_records.stats);
        assert_eq!(from_stream.frames, from_records.frames);
        assert_eq!(from_stream.stats.frames_aggregated, 2);
        Ok(())
    }

    #[test]
    fn census_counts_headers_only() -> TestResult {
        let base = HeaderSpec::default();
        let log = framed([
            RecordBuilder::sized(&base.for_frame(9, 0), 30).build(),
            RecordBuilder::sized(&base.for_frame(9, 1), 30).build(),
            RecordBuilder::sized(&base.for_frame(77, 1), 24).build(),
            vec![1, 2, 3],
        ]);
        let census = census(log.as_slice(), ByteOrder::LittleEndian)?;
        assert_eq!(census.total_records, 4);
        assert_eq!(census.too_short, 1);
        assert_eq!(census.count(9), 2);
        assert_eq!(census.count(77), 1);
        let rows: Vec<_> = census.rows().collect();
        assert_eq!(rows, vec![(9, Some("lobby_info"), 2), (77, None, 1)]);
        Ok(())
    }
}
