//! Track ids as reported in the Session packet.

use chrono::{DateTime, TimeZone};

/// File-name-safe track names indexed by track id.
const TRACK_NAMES: [&str; 30] = [
    "Melbourne",
    "Paul_Ricard",
    "Shanghai",
    "Sakhir",
    "Catalunya",
    "Monaco",
    "Montreal",
    "Silverstone",
    "Hockenheim",
    "Hungaroring",
    "Spa",
    "Monza",
    "Singapore",
    "Suzuka",
    "Abu_Dhabi",
    "Texas",
    "Brazil",
    "Austria",
    "Sochi",
    "Mexico",
    "Baku",
    "Sakhir_Short",
    "Silverstone_Short",
    "Texas_Short",
    "Suzuka_Short",
    "Hanoi",
    "Zandvoort",
    "Imola",
    "Portimao",
    "Jeddah",
];

/// Name for a track id, `None` for unknown ids (including the game's `-1`).
pub fn track_name(id: i8) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|i| TRACK_NAMES.get(i))
        .copied()
}

/// Track part of a log file name.
pub fn log_file_stem(id: i8) -> String {
    match track_name(id) {
        Some(name) => name.to_string(),
        None => format!("UnknownTrack_{id}"),
    }
}

/// `<Track>_<YYYY-MM-DD_HH-MM-SS>.bin`
pub fn log_file_name<Tz>(track_id: i8, started: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}.bin",
        log_file_stem(track_id),
        started.format("%Y-%m-%d_%H-%M-%S")
    )
}
