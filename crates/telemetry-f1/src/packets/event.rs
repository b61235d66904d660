//! Event packet (id 3).
//!
//! A 4-character ASCII code followed by a payload whose shape depends on the
//! code. Codes without a known payload decode to the code alone.

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{EVENT_CODE_SIZE, HEADER_SIZE};

/// Offset of the code-specific payload.
pub const DETAILS_OFFSET: usize = HEADER_SIZE + EVENT_CODE_SIZE;

pub const FASTEST_LAP: &[u8; 4] = b"FTLP";
pub const RETIREMENT: &[u8; 4] = b"RTMT";
pub const RACE_WINNER: &[u8; 4] = b"RCWN";
pub const PENALTY: &[u8; 4] = b"PENA";
pub const SPEED_TRAP: &[u8; 4] = b"SPTP";
pub const TEAM_MATE_IN_PITS: &[u8; 4] = b"TMPT";
pub const START_LIGHTS: &[u8; 4] = b"STLG";
pub const BUTTON_STATUS: &[u8; 4] = b"BUTN";

/// Payload of the codes that carry one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventDetails {
    FastestLap {
        vehicle_idx: u8,
        /// Seconds.
        lap_time: f32,
    },
    Retirement {
        vehicle_idx: u8,
    },
    RaceWinner {
        vehicle_idx: u8,
    },
    TeamMateInPits {
        vehicle_idx: u8,
    },
    Penalty {
        penalty_type: u8,
        infringement_type: u8,
        vehicle_idx: u8,
        other_vehicle_idx: u8,
        time: u8,
        lap_num: u8,
        places_gained: u8,
    },
    SpeedTrap {
        vehicle_idx: u8,
        /// km/h.
        speed: f32,
        is_overall_fastest_in_session: u8,
    },
    StartLights {
        num_lights: u8,
    },
    Buttons {
        button_status: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventData {
    pub code: String,
    #[serde(flatten)]
    pub details: Option<EventDetails>,
}

fn decode_details(
    code: &[u8],
    cursor: &ByteCursor<'_>,
) -> DecodeResult<Option<EventDetails>> {
    let o = DETAILS_OFFSET;
    let details = match code {
        c if c == FASTEST_LAP => EventDetails::FastestLap {
            vehicle_idx: cursor.u8(o)?,
            lap_time: cursor.f32(o + 1)?,
        },
        c if c == RETIREMENT => EventDetails::Retirement {
            vehicle_idx: cursor.u8(o)?,
        },
        c if c == RACE_WINNER => EventDetails::RaceWinner {
            vehicle_idx: cursor.u8(o)?,
        },
        c if c == TEAM_MATE_IN_PITS => EventDetails::TeamMateInPits {
            vehicle_idx: cursor.u8(o)?,
        },
        c if c == PENALTY => {
            let [
                penalty_type,
                infringement_type,
                vehicle_idx,
                other_vehicle_idx,
                time,
                lap_num,
                places_gained,
            ] = cursor.u8_array::<7>(o)?;
            EventDetails::Penalty {
                penalty_type,
                infringement_type,
                vehicle_idx,
                other_vehicle_idx,
                time,
                lap_num,
                places_gained,
            }
        }
        c if c == SPEED_TRAP => EventDetails::SpeedTrap {
            vehicle_idx: cursor.u8(o)?,
            speed: cursor.f32(o + 1)?,
            is_overall_fastest_in_session: cursor.u8(o + 5)?,
        },
        c if c == START_LIGHTS => EventDetails::StartLights {
            num_lights: cursor.u8(o)?,
        },
        c if c == BUTTON_STATUS => EventDetails::Buttons {
            button_status: cursor.u32(o)?,
        },
        _ => return Ok(None),
    };
    Ok(Some(details))
}

pub fn decode(cursor: &ByteCursor<'_>, _header: &RecordHeader) -> DecodeResult<EventData> {
    let code = cursor.fixed_bytes(HEADER_SIZE, EVENT_CODE_SIZE)?;
    let details = decode_details(code, cursor)?;
    Ok(EventData {
        code: String::from_utf8_lossy(code).into_owned(),
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::fixtures::{HeaderSpec, encode_event};
    use crate::header::decode_header;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn event_spec() -> HeaderSpec {
        HeaderSpec {
            packet_type: 3,
            ..HeaderSpec::default()
        }
    }

    fn round_trip(event: &EventData) -> DecodeResult<EventData> {
        let raw = encode_event(&event_spec(), event);
        let header = decode_header(&raw)?;
        decode(&ByteCursor::le(&raw), &header)
    }

    #[test]
    fn penalty_decodes_all_seven_fields() -> TestResult {
        let event = EventData {
            code: "PENA".to_string(),
            details: Some(EventDetails::Penalty {
                penalty_type: 4,
                infringement_type: 7,
                vehicle_idx: 12,
                other_vehicle_idx: 255,
                time: 5,
                lap_num: 23,
                places_gained: 1,
            }),
        };
        assert_eq!(round_trip(&event)?, event);
        Ok(())
    }

    #[test]
    fn unknown_code_yields_code_only() -> TestResult {
        let event = EventData {
            code: "ZZZZ".to_string(),
            details: None,
        };
        let decoded = round_trip(&event)?;
        assert_eq!(decoded.code, "ZZZZ");
        assert_eq!(decoded.details, None);
        Ok(())
    }

    #[test]
    fn session_started_has_no_details() -> TestResult {
        let event = EventData {
            code: "SSTA".to_string(),
            details: None,
        };
        assert_eq!(round_trip(&event)?, event);
        Ok(())
    }

    #[test]
    fn fastest_lap_and_speed_trap() -> TestResult {
        let ftlp = EventData {
            code: "FTLP".to_string(),
            details: Some(EventDetails::FastestLap {
                vehicle_idx: 3,
                lap_time: 77.125,
            }),
        };
        assert_eq!(round_trip(&ftlp)?, ftlp);

        let sptp = EventData {
            code: "SPTP".to_string(),
            details: Some(EventDetails::SpeedTrap {
                vehicle_idx: 9,
                speed: 331.5,
                is_overall_fastest_in_session: 1,
            }),
        };
        assert_eq!(round_trip(&sptp)?, sptp);
        Ok(())
    }

    #[test]
    fn vehicle_only_codes() -> TestResult {
        for details in [
            EventDetails::Retirement { vehicle_idx: 5 },
            EventDetails::RaceWinner { vehicle_idx: 0 },
            EventDetails::TeamMateInPits { vehicle_idx: 14 },
        ] {
            let code = match details {
                EventDetails::Retirement { .. } => "RTMT",
                EventDetails::RaceWinner { .. } => "RCWN",
                _ => "TMPT",
            };
            let event = EventData {
                code: code.to_string(),
                details: Some(details),
            };
            assert_eq!(round_trip(&event)?, event);
        }
        Ok(())
    }

    #[test]
    fn missing_code_is_truncated() -> TestResult {
        let raw = encode_event(
            &event_spec(),
            &EventData {
                code: "FTLP".to_string(),
                details: None,
            },
        );
        let short = raw.get(..HEADER_SIZE + 2).ok_or("slice")?;
        let header = decode_header(short)?;
        assert!(matches!(
            decode(&ByteCursor::le(short), &header),
            Err(DecodeError::TruncatedRecord { .. })
        ));
        Ok(())
    }

    #[test]
    fn serialises_flat() -> TestResult {
        let event = EventData {
            code: "RTMT".to_string(),
            details: Some(EventDetails::Retirement { vehicle_idx: 5 }),
        };
        let json = serde_json::to_value(&event)?;
        assert_eq!(json, serde_json::json!({ "code": "RTMT", "vehicle_idx": 5 }));
        Ok(())
    }
}
