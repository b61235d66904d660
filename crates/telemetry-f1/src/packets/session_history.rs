//! Session history packet (id 11).
//!
//! Layout: 7-byte scalar block, 100 lap slots of 11 bytes, then 8 tyre stint
//! slots of 3 bytes at a fixed offset. Laps are read until the declared count
//! or until the next slot does not fit. Stints are read only when all 8 slots
//! are present.

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{
    HEADER_SIZE, LAP_HISTORY_ENTRY_SIZE, MAX_LAP_HISTORY, MAX_TYRE_STINTS,
    SESSION_HISTORY_SCALAR_SIZE, TYRE_STINT_ENTRY_SIZE,
};

pub const LAPS_OFFSET: usize = HEADER_SIZE + SESSION_HISTORY_SCALAR_SIZE;
pub const STINTS_OFFSET: usize = LAPS_OFFSET + MAX_LAP_HISTORY * LAP_HISTORY_ENTRY_SIZE;

pub const LAP_VALID: u8 = 0x01;
pub const SECTOR1_VALID: u8 = 0x02;
pub const SECTOR2_VALID: u8 = 0x04;
pub const SECTOR3_VALID: u8 = 0x08;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LapHistory {
    pub lap_time_in_ms: u32,
    pub sector1_time_in_ms: u16,
    pub sector2_time_in_ms: u16,
    pub sector3_time_in_ms: u16,
    pub lap_valid: bool,
    pub sector1_valid: bool,
    pub sector2_valid: bool,
    pub sector3_valid: bool,
}

impl LapHistory {
    /// Wire form of the four validity booleans.
    pub fn valid_bit_flags(&self) -> u8 {
        let mut flags = 0;
        for (set, bit) in [
            (self.lap_valid, LAP_VALID),
            (self.sector1_valid, SECTOR1_VALID),
            (self.sector2_valid, SECTOR2_VALID),
            (self.sector3_valid, SECTOR3_VALID),
        ] {
            if set {
                flags |= bit;
            }
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TyreStint {
    pub end_lap: u8,
    pub tyre_actual_compound: u8,
    pub tyre_visual_compound: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionHistoryData {
    pub car_idx: u8,
    pub num_laps: u8,
    pub num_tyre_stints: u8,
    pub best_lap_time_lap_num: u8,
    pub best_sector1_lap_num: u8,
    pub best_sector2_lap_num: u8,
    pub best_sector3_lap_num: u8,
    pub lap_history: Vec<LapHistory>,
    pub tyre_stints: Vec<TyreStint>,
}

fn lap(cursor: &ByteCursor<'_>, o: usize) -> DecodeResult<LapHistory> {
    let flags = cursor.u8(o + 10)?;
    Ok(LapHistory {
        lap_time_in_ms: cursor.u32(o)?,
        sector1_time_in_ms: cursor.u16(o + 4)?,
        sector2_time_in_ms: cursor.u16(o + 6)?,
        sector3_time_in_ms: cursor.u16(o + 8)?,
        lap_valid: flags & LAP_VALID != 0,
        sector1_valid: flags & SECTOR1_VALID != 0,
        sector2_valid: flags & SECTOR2_VALID != 0,
        sector3_valid: flags & SECTOR3_VALID != 0,
    })
}

fn laps(cursor: &ByteCursor<'_>, declared: u8) -> DecodeResult<Vec<LapHistory>> {
    let wanted = usize::from(declared).min(MAX_LAP_HISTORY);
    let mut out = Vec::with_capacity(wanted);
    for i in 0..wanted {
        let o = LAPS_OFFSET + i * LAP_HISTORY_ENTRY_SIZE;
        if !cursor.fits(o, LAP_HISTORY_ENTRY_SIZE) {
            break;
        }
        out.push(lap(cursor, o)?);
    }
    Ok(out)
}

fn stints(cursor: &ByteCursor<'_>, declared: u8) -> DecodeResult<Vec<TyreStint>> {
    if !cursor.fits(STINTS_OFFSET, MAX_TYRE_STINTS * TYRE_STINT_ENTRY_SIZE) {
        return Ok(Vec::new());
    }
    let wanted = usize::from(declared).min(MAX_TYRE_STINTS);
    (0..wanted)
        .map(|i| {
            let [end_lap, tyre_actual_compound, tyre_visual_compound] =
                cursor.u8_array::<3>(STINTS_OFFSET + i * TYRE_STINT_ENTRY_SIZE)?;
            Ok(TyreStint {
                end_lap,
                tyre_actual_compound,
                tyre_visual_compound,
            })
        })
        .collect()
}

pub fn decode(cursor: &ByteCursor<'_>, _header: &RecordHeader) -> DecodeResult<SessionHistoryData> {
    let [
        car_idx,
        num_laps,
        num_tyre_stints,
        best_lap_time_lap_num,
        best_sector1_lap_num,
        best_sector2_lap_num,
        best_sector3_lap_num,
    ] = cursor.u8_array::<SESSION_HISTORY_SCALAR_SIZE>(HEADER_SIZE)?;

    Ok(SessionHistoryData {
        car_idx,
        num_laps,
        num_tyre_stints,
        best_lap_time_lap_num,
        best_sector1_lap_num,
        best_sector2_lap_num,
        best_sector3_lap_num,
        lap_history: laps(cursor, num_laps)?,
        tyre_stints: stints(cursor, num_tyre_stints)?,
    })
}
