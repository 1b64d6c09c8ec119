use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::warn;

use crate::models::{BigMiss, LocationType};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

/// Decode a stored location value. Unknown text decodes as absent so one odd
/// row never fails a whole list read.
pub fn parse_location(value: Option<String>) -> Option<LocationType> {
    let raw = value?;
    match LocationType::parse(&raw) {
        Some(location) => Some(location),
        None => {
            warn!("ignoring unknown location_type '{raw}'");
            None
        }
    }
}

pub fn parse_miss(value: Option<String>) -> Option<BigMiss> {
    let raw = value?;
    match BigMiss::parse(&raw) {
        Some(miss) => Some(miss),
        None => {
            warn!("ignoring unknown big_miss '{raw}'");
            None
        }
    }
}

/// Ratings are stored as INTEGER; anything that does not fit a u8 decodes as
/// absent. Range checking against [1,5] belongs to the stats engine.
pub fn parse_rating(value: Option<i64>, field: &str) -> Option<u8> {
    let raw = value?;
    match u8::try_from(raw) {
        Ok(rating) => Some(rating),
        Err(_) => {
            warn!("ignoring out-of-range {field} value {raw}");
            None
        }
    }
}

/// Tags are stored as a JSON array column. Malformed JSON decodes as empty.
pub fn parse_tags(value: &str) -> Vec<String> {
    match serde_json::from_str(value) {
        Ok(tags) => tags,
        Err(err) => {
            warn!("ignoring malformed tags column '{value}': {err}");
            Vec::new()
        }
    }
}

pub fn tags_to_json(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).context("failed to serialize tags")
}
