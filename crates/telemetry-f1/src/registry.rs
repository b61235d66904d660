//! Packet type → decoder lookup.

use tracing::trace;

use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::{DecodeError, DecodeResult};
use crate::header::{RecordHeader, parse_header};
use crate::packets::{
    DecodedPacket, PacketData, car_damage, car_setups, car_status, car_telemetry, event,
    final_classification, lap_data, lobby_info, motion, participants, session,
    session_history,
};
use crate::protocol::PacketKind;

/// Decoder entry point shared by every packet kind.
pub type DecodeFn = fn(&ByteCursor<'_>, &RecordHeader) -> DecodeResult<PacketData>;

fn decode_motion(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    motion::decode(c, h).map(PacketData::Motion)
}

fn decode_session(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    session::decode(c, h).map(PacketData::Session)
}

fn decode_lap_data(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    lap_data::decode(c, h).map(PacketData::LapData)
}

fn decode_event(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    event::decode(c, h).map(PacketData::Event)
}

fn decode_participants(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    participants::decode(c, h).map(PacketData::Participants)
}

fn decode_car_setups(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    car_setups::decode(c, h).map(PacketData::CarSetups)
}

fn decode_car_telemetry(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    car_telemetry::decode(c, h).map(PacketData::CarTelemetry)
}

fn decode_car_status(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    car_status::decode(c, h).map(PacketData::CarStatus)
}

fn decode_final_classification(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    final_classification::decode(c, h).map(PacketData::FinalClassification)
}

fn decode_car_damage(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    car_damage::decode(c, h).map(PacketData::CarDamage)
}

fn decode_session_history(c: &ByteCursor<'_>, h: &RecordHeader) -> DecodeResult<PacketData> {
    session_history::decode(c, h).map(PacketData::SessionHistory)
}

/// Fixed table of decoders indexed by packet id.
#[derive(Debug, Clone)]
pub struct PacketRegistry {
    decoders: [DecodeFn; PacketKind::ALL.len()],
}

impl Default for PacketRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl PacketRegistry {
    /// Registry with every kind mapped to its decoder and `LobbyInfo` mapped
    /// to the unsupported stub.
    pub fn standard() -> Self {
        Self {
            decoders: [
                decode_motion,
                decode_session,
                decode_lap_data,
                decode_event,
                decode_participants,
                decode_car_setups,
                decode_car_telemetry,
                decode_car_status,
                decode_final_classification,
                lobby_info::decode,
                decode_car_damage,
                decode_session_history,
            ],
        }
    }

    /// Decoder for `packet_id`, `None` outside 0–11.
    pub fn lookup(&self, packet_id: u8) -> Option<DecodeFn> {
        self.decoders.get(usize::from(packet_id)).copied()
    }

    /// Decode the payload of a record whose header has already been parsed.
    pub fn dispatch(
        &self,
        cursor: &ByteCursor<'_>,
        header: &RecordHeader,
    ) -> DecodeResult<DecodedPacket> {
        let decode = self
            .lookup(header.packet_type)
            .ok_or(DecodeError::UnknownPacketType(header.packet_type))?;
        trace!(
            packet_type = header.packet_type,
            frame_id = header.frame_id,
            len = cursor.len(),
            order = ?cursor.order(),
            "dispatching record"
        );
        decode(cursor, header).map(|data| DecodedPacket::new(header, data))
    }

    /// Parse the header of `raw` and dispatch its payload.
    pub fn decode_record(&self, raw: &[u8], order: ByteOrder) -> DecodeResult<DecodedPacket> {
        let cursor = ByteCursor::new(raw, order);
        let header = parse_header(&cursor)?;
        self.dispatch(&cursor, &header)
    }
}

/// Decode one record with the standard registry.
pub fn decode_record(raw: &[u8], order: ByteOrder) -> DecodeResult<DecodedPacket> {
    PacketRegistry::standard().decode_record(raw, order)
}
