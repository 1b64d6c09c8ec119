use chrono::NaiveDate;

use crate::models::SessionRecord;
use crate::stats::config::{FilterField, SessionFilter, Window};

/// Parse the raw session date. Anything that is not a `YYYY-MM-DD` calendar
/// date is treated as unparseable, never as an error.
pub fn parse_session_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn matches_filter(record: &SessionRecord, filter: Option<&SessionFilter>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    if filter.is_disabled() {
        return true;
    }

    let value = match filter.field {
        FilterField::LocationType => record.location_type.map(|l| l.as_str()),
        FilterField::BigMiss => record.big_miss.map(|m| m.as_str()),
    };

    match value {
        Some(value) => value.eq_ignore_ascii_case(&filter.value),
        None => false,
    }
}

/// Restrict the snapshot to the sequence the aggregator runs over: apply the
/// categorical filter, sort ascending by session date, then keep the last N.
///
/// The sort is stable, so date ties keep the incoming (store insertion)
/// order. Unparseable dates sort after every valid date rather than
/// corrupting the chronology.
pub fn filter_and_window(
    records: &[SessionRecord],
    filter: Option<&SessionFilter>,
    window: Window,
) -> Vec<SessionRecord> {
    let mut kept: Vec<SessionRecord> = records
        .iter()
        .filter(|record| matches_filter(record, filter))
        .cloned()
        .collect();

    kept.sort_by_key(|record| match parse_session_date(&record.session_date) {
        Some(date) => (false, date),
        None => (true, NaiveDate::MAX),
    });

    if let Window::Last(n) = window {
        if kept.len() > n {
            kept.drain(..kept.len() - n);
        }
    }

    kept
}
