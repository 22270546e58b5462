//! `HH:MM` wall-clock formatting for visit times.
//!
//! Use with `#[serde(with = "realty_core::booking::clock")]` on a
//! [`NaiveTime`] field. Parsing also accepts `HH:MM:SS` so clients that send
//! full times keep working, but seconds must be zero.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%H:%M";
const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

/// Render a time as `HH:MM`.
pub fn format(time: NaiveTime) -> String {
    time.format(FORMAT).to_string()
}

/// Parse `HH:MM` (or `HH:MM:00`) into a time.
pub fn parse(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    let time = NaiveTime::parse_from_str(raw, FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, FORMAT_WITH_SECONDS))
        .map_err(|_| format!("Invalid time '{raw}'. Expected HH:MM"))?;
    if time.second() != 0 {
        return Err(format!("Invalid time '{raw}'. Visits start on a whole minute"));
    }
    Ok(time)
}

pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*time))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
