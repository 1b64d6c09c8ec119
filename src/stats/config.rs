use serde::{Deserialize, Serialize};

/// Fixed universe of focus categories. Kept aligned with the tags the logging
/// form offers, so "under-practiced" suggestions can surface categories with
/// zero sessions instead of hiding them.
pub const FOCUS_TAGS: &[&str] = &[
    "Driver",
    "Fairway Woods",
    "Hybrids",
    "Long Irons",
    "Mid Irons",
    "Short Irons",
    "Wedges",
    "Putting",
    "Chipping",
    "Bunker",
    "Range",
    "Simulator",
    "On-Course",
    "Lesson",
    "Fitness / Mobility",
    "Mental Game",
    "Notes / Review",
];

/// Trailing recency window for the "last 30 days" KPI. A fixed business rule,
/// independent of the user-selected window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

pub const TOP_TAG_COUNT: usize = 3;
pub const FOCUS_SUGGESTION_COUNT: usize = 3;

/// User-selected restriction to the trailing N most recent sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Window {
    All,
    Last(usize),
}

/// Which categorical attribute a filter matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    LocationType,
    BigMiss,
}

impl FilterField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "location_type" => Some(FilterField::LocationType),
            "big_miss" => Some(FilterField::BigMiss),
            _ => None,
        }
    }
}

/// Categorical filter: keep sessions whose `field` value matches `value`
/// case-insensitively. A value of "all" (or empty) disables the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilter {
    pub field: FilterField,
    pub value: String,
}

impl SessionFilter {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.value.is_empty() || self.value.eq_ignore_ascii_case("all")
    }
}

/// Parameters for one stats computation. These are the dashboard controls
/// made explicit; the engine has no notion of a "current UI selection".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub filter: Option<SessionFilter>,
    pub window: Window,
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            filter: None,
            window: Window::All,
        }
    }
}
