//! Session packet (id 1).
//!
//! The 16-field scalar block sits right after the header. The 9-byte assist
//! block is addressed from the end of the record (`len - 9`) because its
//! absolute position moves between producer versions. Both addressing rules
//! are kept as they are.

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::RecordHeader;
use crate::packets::require_block;
use crate::protocol::{HEADER_SIZE, PacketKind, SESSION_ASSIST_SIZE, SESSION_SCALAR_SIZE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssistSettings {
    pub steering_assist: u8,
    pub braking_assist: u8,
    pub gearbox_assist: u8,
    pub pit_assist: u8,
    pub pit_release_assist: u8,
    pub ers_assist: u8,
    pub drs_assist: u8,
    pub racing_line: u8,
    pub racing_line_type: u8,
}

/// Temperatures in °C, track length in metres, times in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub weather: u8,
    pub track_temp: i8,
    pub air_temp: i8,
    pub total_laps: u8,
    pub track_length: u16,
    pub session_type: u8,
    pub track_id: i8,
    pub formula: u8,
    pub session_time_left: u16,
    pub session_duration: u16,
    pub pit_speed_limit: u8,
    pub game_paused: u8,
    pub is_spectating: u8,
    pub spectator_car_index: u8,
    pub sli_pro_native_support: u8,
    pub num_marshal_zones: u8,
    pub assist_settings: AssistSettings,
}

/// Offset of the assist block for a record of `len` bytes.
pub fn assist_offset(len: usize) -> Option<usize> {
    len.checked_sub(SESSION_ASSIST_SIZE)
}

pub fn decode(cursor: &ByteCursor<'_>, _header: &RecordHeader) -> DecodeResult<SessionData> {
    let o = HEADER_SIZE;
    // The assist block must not overlap the scalar block.
    require_block(
        PacketKind::Session,
        cursor,
        o,
        SESSION_SCALAR_SIZE + SESSION_ASSIST_SIZE,
    )?;
    let a = assist_offset(cursor.len()).ok_or(DecodeError::TruncatedRecord {
        offset: 0,
        needed: SESSION_ASSIST_SIZE,
        available: cursor.len(),
    })?;
    let assist = cursor.u8_array::<SESSION_ASSIST_SIZE>(a)?;
    let [
        steering_assist,
        braking_assist,
        gearbox_assist,
        pit_assist,
        pit_release_assist,
        ers_assist,
        drs_assist,
        racing_line,
        racing_line_type,
    ] = assist;

    Ok(SessionData {
        weather: cursor.u8(o)?,
        track_temp: cursor.i8(o + 1)?,
        air_temp: cursor.i8(o + 2)?,
        total_laps: cursor.u8(o + 3)?,
        track_length: cursor.u16(o + 4)?,
        session_type: cursor.u8(o + 6)?,
        track_id: cursor.i8(o + 7)?,
        formula: cursor.u8(o + 8)?,
        session_time_left: cursor.u16(o + 9)?,
        session_duration: cursor.u16(o + 11)?,
        pit_speed_limit: cursor.u8(o + 13)?,
        game_paused: cursor.u8(o + 14)?,
        is_spectating: cursor.u8(o + 15)?,
        spectator_car_index: cursor.u8(o + 16)?,
        sli_pro_native_support: cursor.u8(o + 17)?,
        num_marshal_zones: cursor.u8(o + 18)?,
        assist_settings: AssistSettings {
            steering_assist,
            braking_assist,
            gearbox_assist,
            pit_assist,
            pit_release_assist,
            ers_assist,
            drs_assist,
            racing_line,
            racing_line_type,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{HeaderSpec, SESSION_PACKET_SIZE, encode_session, encode_session_with_len};
    use crate::header::decode_header;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn sample() -> SessionData {
        SessionData {
            weather: 2,
            track_temp: 41,
            air_temp: -3,
            total_laps: 71,
            track_length: 4304,
            session_type: 10,
            track_id: 19,
            formula: 0,
            session_time_left: 6500,
            session_duration: 7200,
            pit_speed_limit: 80,
            game_paused: 0,
            is_spectating: 1,
            spectator_car_index: 4,
            sli_pro_native_support: 0,
            num_marshal_zones: 17,
            assist_settings: AssistSettings {
                steering_assist: 1,
                braking_assist: 2,
                gearbox_assist: 3,
                pit_assist: 1,
                pit_release_assist: 1,
                ers_assist: 0,
                drs_assist: 1,
                racing_line: 2,
                racing_line_type: 1,
            },
        }
    }

    #[test]
    fn decodes_scalar_and_assist_blocks() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 1,
            ..HeaderSpec::default()
        };
        let raw = encode_session(&spec, &sample());
        assert_eq!(raw.len(), SESSION_PACKET_SIZE);

        let header = decode_header(&raw)?;
        assert_eq!(decode(&ByteCursor::le(&raw), &header)?, sample());
        Ok(())
    }

    #[test]
    fn assist_block_follows_record_length() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 1,
            ..HeaderSpec::default()
        };
        for len in [HEADER_SIZE + SESSION_SCALAR_SIZE + SESSION_ASSIST_SIZE, 300, 644] {
            let raw = encode_session_with_len(&spec, &sample(), len);
            let header = decode_header(&raw)?;
            let decoded = decode(&ByteCursor::le(&raw), &header)?;
            assert_eq!(decoded.assist_settings, sample().assist_settings, "len {len}");
            assert_eq!(decoded.track_id, 19);
        }
        Ok(())
    }

    #[test]
    fn record_shorter_than_scalar_block_fails() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 1,
            ..HeaderSpec::default()
        };
        let raw = encode_session(&spec, &sample());
        let short = raw.get(..HEADER_SIZE + SESSION_SCALAR_SIZE - 1).ok_or("slice")?;
        let header = decode_header(short)?;
        assert!(decode(&ByteCursor::le(short), &header).is_err());
        Ok(())
    }

    #[test]
    fn overlapping_blocks_are_rejected() -> TestResult {
        let spec = HeaderSpec {
            packet_type: 1,
            ..HeaderSpec::default()
        };
        let minimum = HEADER_SIZE + SESSION_SCALAR_SIZE + SESSION_ASSIST_SIZE;
        for len in HEADER_SIZE + SESSION_SCALAR_SIZE..minimum {
            let raw = encode_session_with_len(&spec, &sample(), len);
            let header = decode_header(&raw)?;
            let result = decode(&ByteCursor::le(&raw), &header);
            assert!(
                matches!(result, Err(DecodeError::DecodeFailure { .. })),
                "len {len} decoded: {result:?}"
            );
        }

        let raw = encode_session_with_len(&spec, &sample(), minimum);
        let header = decode_header(&raw)?;
        let decoded = decode(&ByteCursor::le(&raw), &header)?;
        assert_eq!(decoded, sample());
        Ok(())
    }
}
