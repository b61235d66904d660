//! Final classification packet (id 8).
//!
//! A car count followed by 45-byte result blocks. Only the player's block is
//! decoded.

use serde::Serialize;

use super::{player_slot, require_block};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{FINAL_CLASSIFICATION_ENTRY_SIZE, HEADER_SIZE, MAX_TYRE_STINTS, PacketKind};

pub const ENTRIES_OFFSET: usize = HEADER_SIZE + 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinalClassificationData {
    pub num_cars: u8,
    pub position: u8,
    pub num_laps: u8,
    pub grid_position: u8,
    pub points: u8,
    pub num_pit_stops: u8,
    pub result_status: u8,
    pub best_lap_time_in_ms: u32,
    /// Seconds, without penalties.
    pub total_race_time: f64,
    pub penalties_time: u8,
    pub num_penalties: u8,
    pub num_tyre_stints: u8,
    pub tyre_stints_actual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_visual: [u8; MAX_TYRE_STINTS],
    pub tyre_stints_end_laps: [u8; MAX_TYRE_STINTS],
}

pub fn decode(
    cursor: &ByteCursor<'_>,
    header: &RecordHeader,
) -> DecodeResult<FinalClassificationData> {
    let num_cars = cursor.u8(HEADER_SIZE)?;
    let slot = player_slot(PacketKind::FinalClassification, header)?;
    let o = ENTRIES_OFFSET + FINAL_CLASSIFICATION_ENTRY_SIZE * slot;
    require_block(
        PacketKind::FinalClassification,
        cursor,
        o,
        FINAL_CLASSIFICATION_ENTRY_SIZE,
    )?;

    let [position, num_laps, grid_position, points, num_pit_stops, result_status] =
        cursor.u8_array::<6>(o)?;

    Ok(FinalClassificationData {
        num_cars,
        position,
        num_laps,
        grid_position,
        points,
        num_pit_stops,
        result_status,
        best_lap_time_in_ms: cursor.u32(o + 6)?,
        total_race_time: cursor.f64(o + 10)?,
        penalties_time: cursor.u8(o + 18)?,
        num_penalties: cursor.u8(o + 19)?,
        num_tyre_stints: cursor.u8(o + 20)?,
        tyre_stints_actual: cursor.u8_array::<MAX_TYRE_STINTS>(o + 21)?,
        tyre_stints_visual: cursor.u8_array::<MAX_TYRE_STINTS>(o + 29)?,
        tyre_stints_end_laps: cursor.u8_array::<MAX_TYRE_STINTS>(o + 37)?,
    })
}
