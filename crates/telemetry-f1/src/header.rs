//! Common 24-byte record header.

use serde::Serialize;

use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::{HEADER_SIZE, PacketKind};

/// Parsed fields of the header every record starts with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecordHeader {
    pub packet_format: u16,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    pub packet_type: u8,
    pub session_uid: u64,
    pub session_time: f32,
    pub frame_id: u32,
    pub player_car_index: u8,
    /// 255 when there is no second player.
    pub secondary_player_car_index: u8,
}

impl RecordHeader {
    /// Packet kind, `None` for ids outside 0–11.
    pub fn kind(&self) -> Option<PacketKind> {
        PacketKind::from_id(self.packet_type)
    }

    /// Player car index as a slot number.
    pub fn player_slot(&self) -> usize {
        usize::from(self.player_car_index)
    }
}

/// Parse the header using the cursor's byte order.
pub fn parse_header(cursor: &ByteCursor<'_>) -> DecodeResult<RecordHeader> {
    if cursor.len() < HEADER_SIZE {
        return Err(DecodeError::TruncatedRecord {
            offset: 0,
            needed: HEADER_SIZE,
            available: cursor.len(),
        });
    }
    Ok(RecordHeader {
        packet_format: cursor.u16(0)?,
        game_major_version: cursor.u8(2)?,
        game_minor_version: cursor.u8(3)?,
        packet_version: cursor.u8(4)?,
        packet_type: cursor.u8(5)?,
        session_uid: cursor.u64(6)?,
        session_time: cursor.f32(14)?,
        frame_id: cursor.u32(18)?,
        player_car_index: cursor.u8(22)?,
        secondary_player_car_index: cursor.u8(23)?,
    })
}

/// Parse the header of a little-endian record.
pub fn decode_header(raw: &[u8]) -> DecodeResult<RecordHeader> {
    parse_header(&ByteCursor::le(raw))
}

/// Parse the header of a record written by the legacy big-endian producer.
pub fn decode_header_big_endian(raw: &[u8]) -> DecodeResult<RecordHeader> {
    parse_header(&ByteCursor::new(raw, ByteOrder::BigEndian))
}
