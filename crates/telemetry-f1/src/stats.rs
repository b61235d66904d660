//! Counters for a decode run.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::DecodeError;
use crate::protocol::PacketKind;

/// What happened to every record of a run.
///
/// `records_observed` equals the sum of the decoded counts and every error
/// bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub records_observed: u64,
    pub decoded: BTreeMap<PacketKind, u64>,
    pub unsupported: u64,
    pub unknown_packet_types: u64,
    pub truncated: u64,
    pub failed: u64,
    pub frames_aggregated: u64,
}

impl DecodeStats {
    pub fn record_decoded(&mut self, kind: PacketKind) {
        self.records_observed += 1;
        *self.decoded.entry(kind).or_insert(0) += 1;
    }

    pub fn record_error(&mut self, err: &DecodeError) {
        self.records_observed += 1;
        match err {
            DecodeError::TruncatedRecord { .. } => self.truncated += 1,
            DecodeError::DecodeFailure { .. } => self.failed += 1,
            DecodeError::UnsupportedVariant(_) => self.unsupported += 1,
            DecodeError::UnknownPacketType(_) => self.unknown_packet_types += 1,
        }
    }

    pub fn decoded_total(&self) -> u64 {
        self.decoded.values().sum()
    }

    pub fn decoded_of(&self, kind: PacketKind) -> u64 {
        self.decoded.get(&kind).copied().unwrap_or(0)
    }

    /// Records rejected because their bytes were malformed.
    pub fn malformed(&self) -> u64 {
        self.truncated + self.failed
    }

    /// Well-formed records that carried nothing to decode.
    pub fn no_value(&self) -> u64 {
        self.unsupported + self.unknown_packet_types
    }
}

impl fmt::Display for DecodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} decoded, {} malformed ({} truncated, {} failed), \
             {} unsupported, {} unknown type; {} frames",
            self.records_observed,
            self.decoded_total(),
            self.malformed(),
            self.truncated,
            self.failed,
            self.unsupported,
            self.unknown_packet_types,
            self.frames_aggregated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_add_up() {
        let mut stats = DecodeStats::default();
        stats.record_decoded(PacketKind::Motion);
        stats.record_decoded(PacketKind::Motion);
        stats.record_decoded(PacketKind::Event);
        stats.record_error(&DecodeError::UnknownPacketType(99));
        stats.record_error(&DecodeError::UnsupportedVariant(PacketKind::LobbyInfo));
        stats.record_error(&DecodeError::TruncatedRecord {
            offset: 0,
            needed: 24,
            available: 3,
        });
        stats.record_error(&DecodeError::failure(PacketKind::CarDamage, "short"));

        assert_eq!(stats.records_observed, 7);
        assert_eq!(stats.decoded_of(PacketKind::Motion), 2);
        assert_eq!(stats.decoded_of(PacketKind::Session), 0);
        assert_eq!(stats.decoded_total() + stats.malformed() + stats.no_value(), 7);
    }

    #[test]
    fn summary_line() {
        let mut stats = DecodeStats::default();
        stats.record_decoded(PacketKind::LapData);
        stats.record_error(&DecodeError::UnknownPacketType(42));
        stats.frames_aggregated = 1;
        assert_eq!(
            stats.to_string(),
            "2 records: 1 decoded, 0 malformed (0 truncated, 0 failed), \
             0 unsupported, 1 unknown type; 1 frames"
        );
    }
}
