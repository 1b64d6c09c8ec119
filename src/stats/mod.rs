pub mod aggregate;
pub mod config;
pub mod filter;
pub mod series;
pub mod suggest;
mod types;

pub use aggregate::CategorySource;
pub use config::{
    FilterField, SessionFilter, StatsQuery, Window, FOCUS_SUGGESTION_COUNT, FOCUS_TAGS,
    RECENT_WINDOW_DAYS, TOP_TAG_COUNT,
};
pub use types::{CategoryCount, RatingAverages, SeriesPoint, StatsReport};

use chrono::NaiveDate;

use crate::models::SessionRecord;

/// Compute the full dashboard report from a snapshot of session records.
///
/// Pure: no clock reads, no I/O, no mutation of the snapshot. `today` anchors
/// the fixed 30-day recency KPI. Every stage below runs over the same scoped
/// sequence, so the report is internally consistent.
pub fn compute_stats(
    records: &[SessionRecord],
    query: &StatsQuery,
    today: NaiveDate,
) -> StatsReport {
    let scoped = filter::filter_and_window(records, query.filter.as_ref(), query.window);

    let tag_counts = aggregate::frequency_table(&scoped, CategorySource::Tags);
    let miss_counts = aggregate::frequency_table(&scoped, CategorySource::BigMiss);

    StatsReport {
        total_count: scoped.len(),
        recent_count: aggregate::recent_count(&scoped, today),
        averages: aggregate::rating_averages(&scoped),
        top_miss: aggregate::top_value(&miss_counts),
        top_tags: suggest::top_tags(&tag_counts),
        focus_suggestions: suggest::focus_suggestions(&tag_counts, FOCUS_TAGS),
        series: series::chart_series(&scoped),
        tag_counts,
    }
}
