//! Decode error taxonomy.
//!
//! Every decode call returns one of these instead of a partial value. Only
//! [`DecodeError::TruncatedRecord`] and [`DecodeError::DecodeFailure`] describe
//! malformed input; the other two variants mean "no value for this record".

use thiserror::Error;

use crate::protocol::PacketKind;

/// Error produced while decoding a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read needed more bytes than the record holds.
    #[error("truncated record: need {needed} bytes at offset {offset}, record has {available}")]
    TruncatedRecord {
        /// Absolute offset of the failed read.
        offset: usize,
        /// Width of the failed read in bytes.
        needed: usize,
        /// Total length of the record buffer.
        available: usize,
    },

    /// A layout-specific invariant did not hold.
    #[error("{kind} decode failed: {reason}")]
    DecodeFailure {
        /// Packet kind being decoded.
        kind: PacketKind,
        /// Human-readable description of the violated invariant.
        reason: String,
    },

    /// The packet kind is known but has no decoder.
    #[error("{0} packets are not decoded")]
    UnsupportedVariant(PacketKind),

    /// The header carries a packet type outside the known range.
    #[error("unknown packet type {0}")]
    UnknownPacketType(u8),
}

impl DecodeError {
    /// Build a [`DecodeError::DecodeFailure`].
    pub fn failure(kind: PacketKind, reason: impl Into<String>) -> Self {
        DecodeError::DecodeFailure {
            kind,
            reason: reason.into(),
        }
    }

    /// `true` for errors caused by malformed bytes.
    ///
    /// Unsupported and unknown packet types are well-formed records that simply
    /// carry nothing to decode.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DecodeError::TruncatedRecord { .. } | DecodeError::DecodeFailure { .. }
        )
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_classification() {
        let truncated = DecodeError::TruncatedRecord {
            offset: 20,
            needed: 4,
            available: 22,
        };
        assert!(truncated.is_malformed());
        assert!(DecodeError::failure(PacketKind::CarDamage, "short").is_malformed());
        assert!(!DecodeError::UnsupportedVariant(PacketKind::LobbyInfo).is_malformed());
        assert!(!DecodeError::UnknownPacketType(99).is_malformed());
    }

    #[test]
    fn display_mentions_context() {
        let err = DecodeError::TruncatedRecord {
            offset: 1464,
            needed: 4,
            available: 1460,
        };
        let msg = err.to_string();
        assert!(msg.contains("1464"));
        assert!(msg.contains("1460"));

        let err = DecodeError::failure(PacketKind::CarDamage, "record too short");
        assert_eq!(err.to_string(), "car_damage decode failed: record too short");
    }
}
