use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Sim,
    Range,
    Course,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Sim => "sim",
            LocationType::Range => "range",
            LocationType::Course => "course",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sim" => Some(LocationType::Sim),
            "range" => Some(LocationType::Range),
            "course" => Some(LocationType::Course),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BigMiss {
    Left,
    Right,
    Thin,
    Fat,
    Heel,
    Toe,
    None,
}

impl BigMiss {
    pub fn as_str(&self) -> &'static str {
        match self {
            BigMiss::Left => "left",
            BigMiss::Right => "right",
            BigMiss::Thin => "thin",
            BigMiss::Fat => "fat",
            BigMiss::Heel => "heel",
            BigMiss::Toe => "toe",
            BigMiss::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "left" => Some(BigMiss::Left),
            "right" => Some(BigMiss::Right),
            "thin" => Some(BigMiss::Thin),
            "fat" => Some(BigMiss::Fat),
            "heel" => Some(BigMiss::Heel),
            "toe" => Some(BigMiss::Toe),
            "none" => Some(BigMiss::None),
            _ => None,
        }
    }
}

/// One logged practice session as stored.
///
/// `session_date` stays a raw `YYYY-MM-DD` string: the stats engine owns the
/// policy for malformed dates, so the store never rejects a row over one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub session_date: String,
    pub location_type: Option<LocationType>,
    pub clubs_focus: Option<String>,
    pub main_goal: Option<String>,
    pub big_miss: Option<BigMiss>,
    pub face_control_rating: Option<u8>,
    pub contact_rating: Option<u8>,
    pub confidence_rating: Option<u8>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for logging a new session. The store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub session_date: String,
    pub location_type: Option<LocationType>,
    pub clubs_focus: Option<String>,
    pub main_goal: Option<String>,
    pub big_miss: Option<BigMiss>,
    pub face_control_rating: Option<u8>,
    pub contact_rating: Option<u8>,
    pub confidence_rating: Option<u8>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl NewSession {
    /// Upstream input validation: ratings in [1,5], date a real calendar date.
    pub fn validate(&self) -> Result<()> {
        if NaiveDate::parse_from_str(&self.session_date, "%Y-%m-%d").is_err() {
            bail!(
                "session_date '{}' is not a YYYY-MM-DD date",
                self.session_date
            );
        }
        for (field, value) in [
            ("face_control_rating", self.face_control_rating),
            ("contact_rating", self.contact_rating),
            ("confidence_rating", self.confidence_rating),
        ] {
            if let Some(rating) = value {
                if !(1..=5).contains(&rating) {
                    bail!("{field} must be between 1 and 5, got {rating}");
                }
            }
        }
        Ok(())
    }
}

/// Partial update for an existing session. `None` leaves a field untouched;
/// the double-Option fields distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub session_date: Option<String>,
    pub location_type: Option<Option<LocationType>>,
    pub clubs_focus: Option<Option<String>>,
    pub main_goal: Option<Option<String>>,
    pub big_miss: Option<Option<BigMiss>>,
    pub face_control_rating: Option<Option<u8>>,
    pub contact_rating: Option<Option<u8>>,
    pub confidence_rating: Option<Option<u8>>,
    pub notes: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self.session_date.is_none()
            && self.location_type.is_none()
            && self.clubs_focus.is_none()
            && self.main_goal.is_none()
            && self.big_miss.is_none()
            && self.face_control_rating.is_none()
            && self.contact_rating.is_none()
            && self.confidence_rating.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(date) = &self.session_date {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                bail!("session_date '{date}' is not a YYYY-MM-DD date");
            }
        }
        for (field, value) in [
            ("face_control_rating", self.face_control_rating),
            ("contact_rating", self.contact_rating),
            ("confidence_rating", self.confidence_rating),
        ] {
            if let Some(Some(rating)) = value {
                if !(1..=5).contains(&rating) {
                    bail!("{field} must be between 1 and 5, got {rating}");
                }
            }
        }
        Ok(())
    }
}
