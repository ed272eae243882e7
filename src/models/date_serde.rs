//! Lenient date deserialization for wire payloads
//!
//! Dates are written as `YYYY-MM-DD` but read from either that form or a
//! full RFC 3339 timestamp such as `2026-10-18T12:00:00.000Z`.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

use crate::budget::schedule::parse_schedule_date;

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_schedule_date(&raw).map_err(de::Error::custom)
}

pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_schedule_date(&raw).map_err(de::Error::custom))
        .transpose()
}
