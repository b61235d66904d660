//! Car telemetry packet (id 6): player slot plus the 3-byte footer.

use serde::Serialize;

use super::{player_slot, require_block};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{
    CAR_TELEMETRY_ENTRY_SIZE, CAR_TELEMETRY_FOOTER_SIZE, HEADER_SIZE, NUM_CARS, PacketKind,
};

/// Offset of the footer following the car array.
pub const FOOTER_OFFSET: usize = HEADER_SIZE + NUM_CARS * CAR_TELEMETRY_ENTRY_SIZE;

/// Wheel arrays are ordered RL, RR, FL, FR.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarTelemetryData {
    /// km/h.
    pub speed: u16,
    pub throttle: f32,
    /// -1.0 full left, 1.0 full right.
    pub steer: f32,
    pub brake: f32,
    pub clutch: u8,
    /// -1 reverse, 0 neutral.
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    pub rev_lights_percent: u8,
    pub rev_lights_bit_value: u16,
    pub brakes_temperature: [u16; 4],
    pub tyres_surface_temperature: [u8; 4],
    pub tyres_inner_temperature: [u8; 4],
    pub engine_temperature: u16,
    pub tyres_pressure: [f32; 4],
    pub surface_type: [u8; 4],
    pub mfd_panel_index: u8,
    pub mfd_panel_index_secondary_player: u8,
    /// 0 when the game has no suggestion.
    pub suggested_gear: i8,
}

pub fn decode(cursor: &ByteCursor<'_>, header: &RecordHeader) -> DecodeResult<CarTelemetryData> {
    let slot = player_slot(PacketKind::CarTelemetry, header)?;
    require_block(
        PacketKind::CarTelemetry,
        cursor,
        FOOTER_OFFSET,
        CAR_TELEMETRY_FOOTER_SIZE,
    )?;
    let o = HEADER_SIZE + slot * CAR_TELEMETRY_ENTRY_SIZE;

    Ok(CarTelemetryData {
        speed: cursor.u16(o)?,
        throttle: cursor.f32(o + 2)?,
        steer: cursor.f32(o + 6)?,
        brake: cursor.f32(o + 10)?,
        clutch: cursor.u8(o + 14)?,
        gear: cursor.i8(o + 15)?,
        engine_rpm: cursor.u16(o + 16)?,
        drs: cursor.u8(o + 18)?,
        rev_lights_percent: cursor.u8(o + 19)?,
        rev_lights_bit_value: cursor.u16(o + 20)?,
        brakes_temperature: cursor.u16_array::<4>(o + 22)?, // 22-29
        tyres_surface_temperature: cursor.u8_array::<4>(o + 30)?,
        tyres_inner_temperature: cursor.u8_array::<4>(o + 34)?,
        engine_temperature: cursor.u16(o + 38)?,
        tyres_pressure: cursor.f32_array::<4>(o + 40)?, // 40-55
        surface_type: cursor.u8_array::<4>(o + 56)?,
        mfd_panel_index: cursor.u8(FOOTER_OFFSET)?,
        mfd_panel_index_secondary_player: cursor.u8(FOOTER_OFFSET + 1)?,
        suggested_gear: cursor.i8(FOOTER_OFFSET + 2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::fixtures::{HeaderSpec, encode_car_telemetry};
    use crate::header::decode_header;
    use crate::protocol::CAR_TELEMETRY_PACKET_SIZE;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn sample() -> CarTelemetryData {
        CarTelemetryData {
            speed: 287,
            throttle: 1.0,
            steer: -0.25,
            brake: 0.0,
            clutch: 0,
            gear: 7,
            engine_rpm: 11_450,
            drs: 1,
            rev_lights_percent: 82,
            rev_lights_bit_value: 0x3FF,
            brakes_temperature: [520, 515, 610, 605],
            tyres_surface_temperature: [96, 97, 101, 100],
            tyres_inner_temperature: [104, 104, 106, 107],
            engine_temperature: 112,
            tyres_pressure: [21.9, 21.9, 23.4, 23.4],
            surface_type: [0, 0, 0, 1],
            mfd_panel_index: 255,
            mfd_panel_index_secondary_player: 255,
            suggested_gear: -1,
        }
    }

    #[test]
    fn decodes_player_slot_and_footer() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 6,
            player_car_index: 19,
            ..HeaderSpec::default()
        };
        let raw = encode_car_telemetry(&spec, &sample());
        assert_eq!(raw.len(), CAR_TELEMETRY_PACKET_SIZE);
        let header = decode_header(&raw)?;
        assert_eq!(decode(&ByteCursor::le(&raw), &header)?, sample());
        Ok(())
    }

    #[test]
    fn missing_footer_fails() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 6,
            ..HeaderSpec::default()
        };
        let mut raw = encode_car_telemetry(&spec, &sample());
        raw.truncate(CAR_TELEMETRY_PACKET_SIZE - 1);
        let header = decode_header(&raw)?;
        assert!(matches!(
            decode(&ByteCursor::le(&raw), &header),
            Err(DecodeError::DecodeFailure {
                kind: PacketKind::CarTelemetry,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn decoding_twice_is_equal() -> TestResult {
        let raw = encode_car_telemetry(&HeaderSpec::default(), &sample());
        let header = decode_header(&raw)?;
        let cursor = ByteCursor::le(&raw);
        assert_eq!(decode(&cursor, &header)?, decode(&cursor, &header)?);
        Ok(())
    }
}
