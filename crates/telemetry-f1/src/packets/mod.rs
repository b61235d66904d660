//! Per-packet-type layout decoders.
//!
//! Each submodule owns one record shape and exposes
//! `decode(&ByteCursor, &RecordHeader) -> DecodeResult<T>`. Decoders read at
//! absolute offsets, ignore trailing bytes and fail instead of returning
//! partially filled values.

pub mod car_damage;
pub mod car_setups;
pub mod car_status;
pub mod car_telemetry;
pub mod event;
pub mod final_classification;
pub mod lap_data;
pub mod lobby_info;
pub mod motion;
pub mod participants;
pub mod session;
pub mod session_history;

use serde::Serialize;

pub use car_damage::CarDamageData;
pub use car_setups::{CarSetup, CarSetupsData};
pub use car_status::CarStatusData;
pub use car_telemetry::CarTelemetryData;
pub use event::{EventData, EventDetails};
pub use final_classification::FinalClassificationData;
pub use lap_data::LapData;
pub use motion::{GForce, MotionData, Rotation, Vec3};
pub use participants::{Participant, ParticipantsData};
pub use session::{AssistSettings, SessionData};
pub use session_history::{LapHistory, SessionHistoryData, TyreStint};

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::RecordHeader;
use crate::protocol::{NUM_CARS, PacketKind};

/// Decoded payload of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PacketData {
    Motion(MotionData),
    Session(SessionData),
    LapData(LapData),
    Event(EventData),
    Participants(ParticipantsData),
    CarSetups(CarSetupsData),
    CarTelemetry(CarTelemetryData),
    CarStatus(CarStatusData),
    FinalClassification(FinalClassificationData),
    CarDamage(CarDamageData),
    SessionHistory(SessionHistoryData),
}

impl PacketData {
    pub fn kind(&self) -> PacketKind {
        match self {
            PacketData::Motion(_) => PacketKind::Motion,
            PacketData::Session(_) => PacketKind::Session,
            PacketData::LapData(_) => PacketKind::LapData,
            PacketData::Event(_) => PacketKind::Event,
            PacketData::Participants(_) => PacketKind::Participants,
            PacketData::CarSetups(_) => PacketKind::CarSetups,
            PacketData::CarTelemetry(_) => PacketKind::CarTelemetry,
            PacketData::CarStatus(_) => PacketKind::CarStatus,
            PacketData::FinalClassification(_) => PacketKind::FinalClassification,
            PacketData::CarDamage(_) => PacketKind::CarDamage,
            PacketData::SessionHistory(_) => PacketKind::SessionHistory,
        }
    }
}

/// A decoded record plus the header fields it came from.
///
/// Serialises flat: `packet_id`, `frame_id`, then the payload's own fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedPacket {
    pub packet_id: u8,
    pub frame_id: u32,
    #[serde(flatten)]
    pub data: PacketData,
}

impl DecodedPacket {
    pub fn new(header: &RecordHeader, data: PacketData) -> Self {
        Self {
            packet_id: header.packet_type,
            frame_id: header.frame_id,
            data,
        }
    }

    pub fn kind(&self) -> PacketKind {
        self.data.kind()
    }
}

/// Slot of the player's car, rejecting indices outside the car array.
pub(crate) fn player_slot(kind: PacketKind, header: &RecordHeader) -> DecodeResult<usize> {
    let slot = header.player_slot();
    if slot >= NUM_CARS {
        return Err(DecodeError::failure(
            kind,
            format!(
                "player car index {slot} out of range (max {})",
                NUM_CARS - 1
            ),
        ));
    }
    Ok(slot)
}

/// Explicit length check ahead of unpacking a block.
pub(crate) fn require_block(
    kind: PacketKind,
    cursor: &ByteCursor<'_>,
    offset: usize,
    size: usize,
) -> DecodeResult<()> {
    if cursor.fits(offset, size) {
        return Ok(());
    }
    Err(DecodeError::failure(
        kind,
        format!(
            "record has {} bytes, block needs {}",
            cursor.len(),
            offset.saturating_add(size)
        ),
    ))
}
