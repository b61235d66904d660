//! Lap data packet (id 2): one 43-byte entry per car, player slot selected.

use serde::Serialize;

use super::{player_slot, require_block};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{HEADER_SIZE, LAP_DATA_ENTRY_SIZE, PacketKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LapData {
    pub last_lap_time_in_ms: u32,
    pub current_lap_time_in_ms: u32,
    pub sector1_time_in_ms: u16,
    pub sector2_time_in_ms: u16,
    /// Metres around the current lap; negative before the line is crossed.
    pub lap_distance: f32,
    pub total_distance: f32,
    pub safety_car_delta: f32,
    pub car_position: u8,
    pub current_lap_num: u8,
    pub pit_status: u8,
    pub num_pit_stops: u8,
    pub sector: u8,
    pub current_lap_invalid: u8,
    pub penalties: u8,
    pub warnings: u8,
    pub num_unserved_drive_through_pens: u8,
    pub num_unserved_stop_go_pens: u8,
    pub grid_position: u8,
    pub driver_status: u8,
    pub result_status: u8,
    pub pit_lane_timer_active: u8,
    pub pit_lane_time_in_lane_in_ms: u16,
    pub pit_stop_timer_in_ms: u16,
    pub pit_stop_should_serve_pen: u8,
}

pub fn decode(cursor: &ByteCursor<'_>, header: &RecordHeader) -> DecodeResult<LapData> {
    let slot = player_slot(PacketKind::LapData, header)?;
    let o = HEADER_SIZE + LAP_DATA_ENTRY_SIZE * slot;
    require_block(PacketKind::LapData, cursor, o, LAP_DATA_ENTRY_SIZE)?;

    Ok(LapData {
        last_lap_time_in_ms: cursor.u32(o)?,
        current_lap_time_in_ms: cursor.u32(o + 4)?,
        sector1_time_in_ms: cursor.u16(o + 8)?,
        sector2_time_in_ms: cursor.u16(o + 10)?,
        lap_distance: cursor.f32(o + 12)?,
        total_distance: cursor.f32(o + 16)?,
        safety_car_delta: cursor.f32(o + 20)?,
        car_position: cursor.u8(o + 24)?,
        current_lap_num: cursor.u8(o + 25)?,
        pit_status: cursor.u8(o + 26)?,
        num_pit_stops: cursor.u8(o + 27)?,
        sector: cursor.u8(o + 28)?,
        current_lap_invalid: cursor.u8(o + 29)?,
        penalties: cursor.u8(o + 30)?,
        warnings: cursor.u8(o + 31)?,
        num_unserved_drive_through_pens: cursor.u8(o + 32)?,
        num_unserved_stop_go_pens: cursor.u8(o + 33)?,
        grid_position: cursor.u8(o + 34)?,
        driver_status: cursor.u8(o + 35)?,
        result_status: cursor.u8(o + 36)?,
        pit_lane_timer_active: cursor.u8(o + 37)?,
        pit_lane_time_in_lane_in_ms: cursor.u16(o + 38)?,
        pit_stop_timer_in_ms: cursor.u16(o + 40)?,
        pit_stop_should_serve_pen: cursor.u8(o + 42)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{HeaderSpec, encode_lap_data};
    use crate::header::decode_header;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn sample() -> LapData {
        LapData {
            last_lap_time_in_ms: 78_412,
            current_lap_time_in_ms: 31_007,
            sector1_time_in_ms: 25_300,
            sector2_time_in_ms: 0,
            lap_distance: 1210.5,
            total_distance: 23_455.0,
            safety_car_delta: 0.0,
            car_position: 3,
            current_lap_num: 6,
            pit_status: 0,
            num_pit_stops: 1,
            sector: 1,
            current_lap_invalid: 0,
            penalties: 5,
            warnings: 2,
            num_unserved_drive_through_pens: 0,
            num_unserved_stop_go_pens: 1,
            grid_position: 8,
            driver_status: 4,
            result_status: 2,
            pit_lane_timer_active: 0,
            pit_lane_time_in_lane_in_ms: 0,
            pit_stop_timer_in_ms: 0,
            pit_stop_should_serve_pen: 1,
        }
    }

    #[test]
    fn selects_player_slot() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 2,
            player_car_index: 21,
            ..HeaderSpec::default()
        };
        let raw = encode_lap_data(&spec, &sample());
        let header = decode_header(&raw)?;
        assert_eq!(decode(&ByteCursor::le(&raw), &header)?, sample());
        Ok(())
    }

    #[test]
    fn short_player_slot_fails() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 2,
            player_car_index: 21,
            ..HeaderSpec::default()
        };
        let mut raw = encode_lap_data(&spec, &sample());
        raw.truncate(HEADER_SIZE + LAP_DATA_ENTRY_SIZE * 22 - 1);
        let header = decode_header(&raw)?;
        assert!(decode(&ByteCursor::le(&raw), &header).is_err());
        Ok(())
    }
}
