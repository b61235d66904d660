//! Car damage packet (id 10).

use serde::Serialize;

use super::{player_slot, require_block};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{CAR_DAMAGE_ENTRY_SIZE, HEADER_SIZE, PacketKind};

/// Damage and wear percentages. Wheel arrays are ordered RL, RR, FL, FR.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarDamageData {
    pub tyres_wear: [f32; 4],
    pub tyres_damage: [u8; 4],
    pub brakes_damage: [u8; 4],
    pub front_left_wing_damage: u8,
    pub front_right_wing_damage: u8,
    pub rear_wing_damage: u8,
    pub floor_damage: u8,
    pub diffuser_damage: u8,
    pub sidepod_damage: u8,
    pub drs_fault: u8,
    pub gear_box_damage: u8,
    pub engine_damage: u8,
    pub engine_mguh_wear: u8,
    pub engine_es_wear: u8,
    pub engine_ce_wear: u8,
    pub engine_ice_wear: u8,
    pub engine_mguk_wear: u8,
    pub engine_tc_wear: u8,
}

pub fn decode(cursor: &ByteCursor<'_>, header: &RecordHeader) -> DecodeResult<CarDamageData> {
    let slot = player_slot(PacketKind::CarDamage, header)?;
    let o = HEADER_SIZE + CAR_DAMAGE_ENTRY_SIZE * slot;
    require_block(PacketKind::CarDamage, cursor, o, CAR_DAMAGE_ENTRY_SIZE)?;

    let [
        front_left_wing_damage,
        front_right_wing_damage,
        rear_wing_damage,
        floor_damage,
        diffuser_damage,
        sidepod_damage,
        drs_fault,
        gear_box_damage,
        engine_damage,
        engine_mguh_wear,
        engine_es_wear,
        engine_ce_wear,
        engine_ice_wear,
        engine_mguk_wear,
        engine_tc_wear,
    ] = cursor.u8_array::<15>(o + 24)?;

    Ok(CarDamageData {
        tyres_wear: cursor.f32_array::<4>(o)?,
        tyres_damage: cursor.u8_array::<4>(o + 16)?,
        brakes_damage: cursor.u8_array::<4>(o + 20)?,
        front_left_wing_damage,
        front_right_wing_damage,
        rear_wing_damage,
        floor_damage,
        diffuser_damage,
        sidepod_damage,
        drs_fault,
        gear_box_damage,
        engine_damage,
        engine_mguh_wear,
        engine_es_wear,
        engine_ce_wear,
        engine_ice_wear,
        engine_mguk_wear,
        engine_tc_wear,
    })
}
