//! Participants packet (id 4): a car count and a 55-byte block per car slot.

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::header::RecordHeader;
use crate::protocol::{HEADER_SIZE, NUM_CARS, PARTICIPANT_ENTRY_SIZE, PARTICIPANT_NAME_SIZE};

/// First participant block.
pub const ENTRIES_OFFSET: usize = HEADER_SIZE + 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub ai_controlled: u8,
    pub driver_id: u8,
    pub network_id: u8,
    pub team_id: u8,
    pub my_team: u8,
    pub race_number: u8,
    pub nationality: u8,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParticipantsData {
    pub num_active_cars: u8,
    /// Every slot, active or not.
    pub participants: Vec<Participant>,
}

/// Name field with its NUL padding trimmed, decoded lossily.
pub fn decode_name(raw: &[u8]) -> String {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(raw.get(..end).unwrap_or(raw)).into_owned()
}

fn participant(cursor: &ByteCursor<'_>, o: usize) -> DecodeResult<Participant> {
    let [ai_controlled, driver_id, network_id, team_id, my_team, race_number, nationality] =
        cursor.u8_array::<7>(o)?;
    Ok(Participant {
        ai_controlled,
        driver_id,
        network_id,
        team_id,
        my_team,
        race_number,
        nationality,
        name: decode_name(cursor.fixed_bytes(o + 7, PARTICIPANT_NAME_SIZE)?),
    })
}

pub fn decode(cursor: &ByteCursor<'_>, _header: &RecordHeader) -> DecodeResult<ParticipantsData> {
    let num_active_cars = cursor.u8(HEADER_SIZE)?;
    let participants = (0..NUM_CARS)
        .map(|i| participant(cursor, ENTRIES_OFFSET + PARTICIPANT_ENTRY_SIZE * i))
        .collect::<DecodeResult<Vec<_>>>()?;
    Ok(ParticipantsData {
        num_active_cars,
        participants,
    })
}
