//! Lenient deserializers for the on-disk JSON tables
//!
//! Data files may come from older versions of the tracker: columns can be
//! backfilled with `null`, whole amounts can appear as `12.0`, and dates can
//! carry a time component. These helpers accept those shapes.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Treat `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Whole(u64),
    Float(f64),
    Text(String),
}

/// Deserialize a non-negative whole amount
///
/// Accepts integers, integral floats and numeric strings. `null` reads as 0.
pub fn amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawAmount::Whole(value)) => Ok(value),
        Some(RawAmount::Float(value)) => float_to_amount(value).map_err(de::Error::custom),
        Some(RawAmount::Text(text)) => {
            let trimmed = text.trim();
            if let Ok(value) = trimmed.parse::<u64>() {
                return Ok(value);
            }
            let value: f64 = trimmed
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid amount '{}'", text)))?;
            float_to_amount(value).map_err(de::Error::custom)
        }
    }
}

fn float_to_amount(value: f64) -> Result<u64, String> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(format!("amount must be a non-negative whole number, got {}", value));
    }
    Ok(value as u64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(i64),
    Text(String),
}

/// Parse an ISO date, ignoring any time component
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Deserialize an optional ISO date
///
/// Accepts `YYYY-MM-DD`, full ISO timestamps and epoch milliseconds.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDate::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawDate::Text(text)) => parse_iso_date(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", text))),
        Some(RawDate::Millis(millis)) => DateTime::from_timestamp_millis(millis)
            .map(|dt| Some(dt.date_naive()))
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp {}", millis))),
    }
}

/// Deserialize a required ISO date
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    optional_date(deserializer)?.ok_or_else(|| de::Error::custom("missing date"))
}
