//! Protocol constants and the packet kind enumeration.
//!
//! Sizes follow the 24-byte-header generation of the EA/Codemasters F1 UDP
//! protocol (packet formats 2021 and 2022).

use core::fmt;

use serde::Serialize;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Size of the common packet header.
pub const HEADER_SIZE: usize = 24;
/// Number of car slots in every per-car array.
pub const NUM_CARS: usize = 22;
/// Default UDP port used by the game.
pub const DEFAULT_UDP_PORT: u16 = 20777;

/// Packet format written by F1 2021.
pub const PACKET_FORMAT_2021: u16 = 2021;
/// Packet format written by F1 2022.
pub const PACKET_FORMAT_2022: u16 = 2022;

// ── Packet entry byte sizes ───────────────────────────────────────────────────

/// One CarMotionData entry.
pub const CAR_MOTION_ENTRY_SIZE: usize = 60;
/// Player-only motion block after the car array (30 × f32).
pub const MOTION_EXTRA_SIZE: usize = 120;
/// Session scalar block directly after the header.
pub const SESSION_SCALAR_SIZE: usize = 19;
/// Assist-settings block at the end of a Session record.
pub const SESSION_ASSIST_SIZE: usize = 9;
/// One LapData entry.
pub const LAP_DATA_ENTRY_SIZE: usize = 43;
/// Event string code width.
pub const EVENT_CODE_SIZE: usize = 4;
/// One ParticipantData entry.
pub const PARTICIPANT_ENTRY_SIZE: usize = 55;
/// Width of a participant name.
pub const PARTICIPANT_NAME_SIZE: usize = 48;
/// One CarSetupData entry.
pub const CAR_SETUP_ENTRY_SIZE: usize = 49;
/// One CarTelemetryData entry.
pub const CAR_TELEMETRY_ENTRY_SIZE: usize = 60;
/// Footer after the car telemetry array.
pub const CAR_TELEMETRY_FOOTER_SIZE: usize = 3;
/// One CarStatusData entry.
pub const CAR_STATUS_ENTRY_SIZE: usize = 47;
/// One FinalClassificationData entry.
pub const FINAL_CLASSIFICATION_ENTRY_SIZE: usize = 45;
/// Number of tyre stints kept per classification/history entry.
pub const MAX_TYRE_STINTS: usize = 8;
/// One CarDamageData entry.
pub const CAR_DAMAGE_ENTRY_SIZE: usize = 39;
/// Scalar block at the start of a SessionHistory record.
pub const SESSION_HISTORY_SCALAR_SIZE: usize = 7;
/// One LapHistoryData entry.
pub const LAP_HISTORY_ENTRY_SIZE: usize = 11;
/// Maximum lap history entries in a SessionHistory record.
pub const MAX_LAP_HISTORY: usize = 100;
/// One TyreStintHistoryData entry.
pub const TYRE_STINT_ENTRY_SIZE: usize = 3;

/// Full motion record size.
pub const MOTION_PACKET_SIZE: usize =
    HEADER_SIZE + NUM_CARS * CAR_MOTION_ENTRY_SIZE + MOTION_EXTRA_SIZE;
/// Full car telemetry record size, footer included.
pub const CAR_TELEMETRY_PACKET_SIZE: usize =
    HEADER_SIZE + NUM_CARS * CAR_TELEMETRY_ENTRY_SIZE + CAR_TELEMETRY_FOOTER_SIZE;
/// Full session history record size.
pub const SESSION_HISTORY_PACKET_SIZE: usize = HEADER_SIZE
    + SESSION_HISTORY_SCALAR_SIZE
    + MAX_LAP_HISTORY * LAP_HISTORY_ENTRY_SIZE
    + MAX_TYRE_STINTS * TYRE_STINT_ENTRY_SIZE;

// ── Packet kinds ──────────────────────────────────────────────────────────────

/// Semantic category of a record, keyed by the header's packet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PacketKind {
    Motion = 0,
    Session = 1,
    LapData = 2,
    Event = 3,
    Participants = 4,
    CarSetups = 5,
    CarTelemetry = 6,
    CarStatus = 7,
    FinalClassification = 8,
    LobbyInfo = 9,
    CarDamage = 10,
    SessionHistory = 11,
}

impl PacketKind {
    /// Every kind in packet-id order.
    pub const ALL: [PacketKind; 12] = [
        PacketKind::Motion,
        PacketKind::Session,
        PacketKind::LapData,
        PacketKind::Event,
        PacketKind::Participants,
        PacketKind::CarSetups,
        PacketKind::CarTelemetry,
        PacketKind::CarStatus,
        PacketKind::FinalClassification,
        PacketKind::LobbyInfo,
        PacketKind::CarDamage,
        PacketKind::SessionHistory,
    ];

    /// Kind for a raw packet id, `None` outside 0–11.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Raw packet id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Stable snake_case name, also used as the output key.
    pub fn name(self) -> &'static str {
        match self {
            PacketKind::Motion => "motion",
            PacketKind::Session => "session",
            PacketKind::LapData => "lap_data",
            PacketKind::Event => "event",
            PacketKind::Participants => "participants",
            PacketKind::CarSetups => "car_setups",
            PacketKind::CarTelemetry => "car_telemetry",
            PacketKind::CarStatus => "car_status",
            PacketKind::FinalClassification => "final_classification",
            PacketKind::LobbyInfo => "lobby_info",
            PacketKind::CarDamage => "car_damage",
            PacketKind::SessionHistory => "session_history",
        }
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(id)
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
