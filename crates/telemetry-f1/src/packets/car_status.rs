//! Car status packet (id 7): the player's 47-byte slot.

use serde::Serialize;

use super::{player_slot, require_block};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{CAR_STATUS_ENTRY_SIZE, HEADER_SIZE, PacketKind};

/// Fuel in kg, ERS energy in joules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarStatusData {
    pub traction_control: u8,
    pub anti_lock_brakes: u8,
    pub fuel_mix: u8,
    pub front_brake_bias: u8,
    pub pit_limiter_status: u8,
    pub fuel_in_tank: f32,
    pub fuel_capacity: f32,
    pub fuel_remaining_laps: f32,
    pub max_rpm: u16,
    pub idle_rpm: u16,
    pub max_gears: u8,
    pub drs_allowed: u8,
    /// 0 when DRS is not available.
    pub drs_activation_distance: u16,
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub tyres_age_laps: u8,
    /// -1 invalid, 0 none, 1 green, 2 blue, 3 yellow, 4 red.
    pub vehicle_fia_flags: i8,
    pub ers_store_energy: f32,
    pub ers_deploy_mode: u8,
    pub ers_harvested_this_lap_mguk: f32,
    pub ers_harvested_this_lap_mguh: f32,
    pub ers_deployed_this_lap: f32,
    pub network_paused: u8,
}

pub fn decode(cursor: &ByteCursor<'_>, header: &RecordHeader) -> DecodeResult<CarStatusData> {
    let slot = player_slot(PacketKind::CarStatus, header)?;
    let o = HEADER_SIZE + slot * CAR_STATUS_ENTRY_SIZE;
    require_block(PacketKind::CarStatus, cursor, o, CAR_STATUS_ENTRY_SIZE)?;

    let [traction_control, anti_lock_brakes, fuel_mix, front_brake_bias, pit_limiter_status] =
        cursor.u8_array::<5>(o)?;
    let [fuel_in_tank, fuel_capacity, fuel_remaining_laps] = cursor.f32_array::<3>(o + 5)?;

    Ok(CarStatusData {
        traction_control,
        anti_lock_brakes,
        fuel_mix,
        front_brake_bias,
        pit_limiter_status,
        fuel_in_tank,
        fuel_capacity,
        fuel_remaining_laps,
        max_rpm: cursor.u16(o + 17)?,
        idle_rpm: cursor.u16(o + 19)?,
        max_gears: cursor.u8(o + 21)?,
        drs_allowed: cursor.u8(o + 22)?,
        drs_activation_distance: cursor.u16(o + 23)?,
        actual_tyre_compound: cursor.u8(o + 25)?,
        visual_tyre_compound: cursor.u8(o + 26)?,
        tyres_age_laps: cursor.u8(o + 27)?,
        vehicle_fia_flags: cursor.i8(o + 28)?,
        ers_store_energy: cursor.f32(o + 29)?,
        ers_deploy_mode: cursor.u8(o + 33)?,
        ers_harvested_this_lap_mguk: cursor.f32(o + 34)?,
        ers_harvested_this_lap_mguh: cursor.f32(o + 38)?,
        ers_deployed_this_lap: cursor.f32(o + 42)?,
        network_paused: cursor.u8(o + 46)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{HeaderSpec, encode_car_status};
    use crate::header::decode_header;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn sample() -> CarStatusData {
        CarStatusData {
            traction_control: 0,
            anti_lock_brakes: 0,
            fuel_mix: 2,
            front_brake_bias: 57,
            pit_limiter_status: 0,
            fuel_in_tank: 42.5,
            fuel_capacity: 110.0,
            fuel_remaining_laps: 3.25,
            max_rpm: 13_000,
            idle_rpm: 4_000,
            max_gears: 8,
            drs_allowed: 1,
            drs_activation_distance: 0,
            actual_tyre_compound: 17,
            visual_tyre_compound: 17,
            tyres_age_laps: 9,
            vehicle_fia_flags: -1,
            ers_store_energy: 2_800_000.0,
            ers_deploy_mode: 1,
            ers_harvested_this_lap_mguk: 150_000.0,
            ers_harvested_this_lap_mguh: 0.0,
            ers_deployed_this_lap: 900_000.0,
            network_paused: 0,
        }
    }

    #[test]
    fn mixed_width_fields_round_trip() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 7,
            player_car_index: 11,
            ..HeaderSpec::default()
        };
        let raw = encode_car_status(&spec, &sample());
        let header = decode_header(&raw)?;
        assert_eq!(decode(&ByteCursor::le(&raw), &header)?, sample());
        Ok(())
    }

    #[test]
    fn slot_one_byte_short_fails() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 7,
            player_car_index: 0,
            ..HeaderSpec::default()
        };
        let mut raw = encode_car_status(&spec, &sample());
        raw.truncate(HEADER_SIZE + CAR_STATUS_ENTRY_SIZE - 1);
        let header = decode_header(&raw)?;
        assert!(decode(&ByteCursor::le(&raw), &header).is_err());
        Ok(())
    }
}
