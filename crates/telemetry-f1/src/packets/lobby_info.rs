//! Lobby info packet (id 9). Recognised but not decoded.

use super::PacketData;
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::RecordHeader;
use crate::protocol::PacketKind;

/// Always [`DecodeError::UnsupportedVariant`]; the record counts as "no value".
pub fn decode(_cursor: &ByteCursor<'_>, _header: &RecordHeader) -> DecodeResult<PacketData> {
    Err(DecodeError::UnsupportedVariant(PacketKind::LobbyInfo))
}
