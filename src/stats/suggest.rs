use crate::stats::config::{FOCUS_SUGGESTION_COUNT, TOP_TAG_COUNT};
use crate::stats::types::CategoryCount;

/// The most practiced tags: highest counts first, ties in first-appearance
/// order (the sort is stable over the table's insertion order).
pub fn top_tags(tag_counts: &[CategoryCount]) -> Vec<CategoryCount> {
    let mut ranked = tag_counts.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_TAG_COUNT);
    ranked
}

/// Under-practiced suggestions, seeded from the full category universe so a
/// category with zero sessions is surfaced rather than hidden by absence from
/// the data. Ascending by count; ties keep the universe's canonical order.
pub fn focus_suggestions(tag_counts: &[CategoryCount], universe: &[&str]) -> Vec<CategoryCount> {
    let mut seeded: Vec<CategoryCount> = universe
        .iter()
        .map(|category| CategoryCount {
            label: (*category).to_string(),
            count: tag_counts
                .iter()
                .find(|entry| entry.label == *category)
                .map(|entry| entry.count)
                .unwrap_or(0),
        })
        .collect();

    seeded.sort_by_key(|entry| entry.count);
    seeded.truncate(FOCUS_SUGGESTION_COUNT);
    seeded
}
