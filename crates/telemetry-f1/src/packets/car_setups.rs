//! Car setups packet (id 5). Every car slot is returned.

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{CAR_SETUP_ENTRY_SIZE, HEADER_SIZE, NUM_CARS};

/// Pressures in PSI, fuel in kg.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarSetup {
    pub front_wing: u8,
    pub rear_wing: u8,
    pub on_throttle: u8,
    pub off_throttle: u8,
    pub front_camber: f32,
    pub rear_camber: f32,
    pub front_toe: f32,
    pub rear_toe: f32,
    pub front_suspension: u8,
    pub rear_suspension: u8,
    pub front_anti_roll_bar: u8,
    pub rear_anti_roll_bar: u8,
    pub front_suspension_height: u8,
    pub rear_suspension_height: u8,
    pub brake_pressure: u8,
    pub brake_bias: u8,
    pub rear_left_tyre_pressure: f32,
    pub rear_right_tyre_pressure: f32,
    pub front_left_tyre_pressure: f32,
    pub front_right_tyre_pressure: f32,
    pub ballast: u8,
    pub fuel_load: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarSetupsData {
    pub car_setups: Vec<CarSetup>,
}

fn car_setup(cursor: &ByteCursor<'_>, o: usize) -> DecodeResult<CarSetup> {
    let [front_wing, rear_wing, on_throttle, off_throttle] = cursor.u8_array::<4>(o)?;
    let [front_camber, rear_camber, front_toe, rear_toe] = cursor.f32_array::<4>(o + 4)?;
    let [
        front_suspension,
        rear_suspension,
        front_anti_roll_bar,
        rear_anti_roll_bar,
        front_suspension_height,
        rear_suspension_height,
        brake_pressure,
        brake_bias,
    ] = cursor.u8_array::<8>(o + 20)?;
    let [
        rear_left_tyre_pressure,
        rear_right_tyre_pressure,
        front_left_tyre_pressure,
        front_right_tyre_pressure,
    ] = cursor.f32_array::<4>(o + 28)?;

    Ok(CarSetup {
        front_wing,
        rear_wing,
        on_throttle,
        off_throttle,
        front_camber,
        rear_camber,
        front_toe,
        rear_toe,
        front_suspension,
        rear_suspension,
        front_anti_roll_bar,
        rear_anti_roll_bar,
        front_suspension_height,
        rear_suspension_height,
        brake_pressure,
        brake_bias,
        rear_left_tyre_pressure,
        rear_right_tyre_pressure,
        front_left_tyre_pressure,
        front_right_tyre_pressure,
        ballast: cursor.u8(o + 44)?,
        fuel_load: cursor.f32(o + 45)?,
    })
}

pub fn decode(cursor: &ByteCursor<'_>, _header: &RecordHeader) -> DecodeResult<CarSetupsData> {
    let car_setups = (0..NUM_CARS)
        .map(|i| car_setup(cursor, HEADER_SIZE + CAR_SETUP_ENTRY_SIZE * i))
        .collect::<DecodeResult<Vec<_>>>()?;
    Ok(CarSetupsData { car_setups })
}
