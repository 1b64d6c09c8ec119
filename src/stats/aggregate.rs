use chrono::NaiveDate;

use crate::models::SessionRecord;
use crate::stats::config::RECENT_WINDOW_DAYS;
use crate::stats::filter::parse_session_date;
use crate::stats::types::{CategoryCount, RatingAverages};

/// Which categorical attribute feeds the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Tags,
    BigMiss,
}

/// Sessions dated within the trailing 30 days of `today`, inclusive.
/// Unparseable dates never count. Future-dated sessions do: the window only
/// bounds how old a session may be.
pub fn recent_count(records: &[SessionRecord], today: NaiveDate) -> usize {
    records
        .iter()
        .filter(|record| match parse_session_date(&record.session_date) {
            Some(date) => (today - date).num_days() <= RECENT_WINDOW_DAYS,
            None => false,
        })
        .count()
}

/// A rating contributes only when present and inside the 1-5 scale. An
/// out-of-range value is treated as absent rather than poisoning the average.
pub fn usable_rating(value: Option<u8>) -> Option<u8> {
    value.filter(|rating| (1..=5).contains(rating))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn average<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = u8>,
{
    let mut sum = 0u32;
    let mut count = 0u32;
    for value in values {
        sum += u32::from(value);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(round2(f64::from(sum) / f64::from(count)))
}

/// Average each rating independently over its present values. A rating no
/// session carries averages to `None`, never to zero.
pub fn rating_averages(records: &[SessionRecord]) -> RatingAverages {
    RatingAverages {
        face_control: average(
            records
                .iter()
                .filter_map(|r| usable_rating(r.face_control_rating)),
        ),
        contact: average(records.iter().filter_map(|r| usable_rating(r.contact_rating))),
        confidence: average(
            records
                .iter()
                .filter_map(|r| usable_rating(r.confidence_rating)),
        ),
    }
}

/// Count occurrences per distinct value, in first-appearance order. The
/// insertion order is contractual: it is the tie-break for `top_value` and
/// the top-tags ranking. Tag cardinality is small, so the linear scan is the
/// simplest structure that keeps that order.
fn bump(table: &mut Vec<CategoryCount>, label: &str) {
    match table.iter_mut().find(|entry| entry.label == label) {
        Some(entry) => entry.count += 1,
        None => table.push(CategoryCount {
            label: label.to_string(),
            count: 1,
        }),
    }
}

/// Frequency table for the chosen categorical source. A session contributes
/// once per distinct tag it carries; `big_miss` contributes its lower-cased
/// single value.
pub fn frequency_table(records: &[SessionRecord], source: CategorySource) -> Vec<CategoryCount> {
    let mut table = Vec::new();
    for record in records {
        match source {
            CategorySource::Tags => {
                for tag in &record.tags {
                    bump(&mut table, tag);
                }
            }
            CategorySource::BigMiss => {
                if let Some(miss) = record.big_miss {
                    bump(&mut table, miss.as_str());
                }
            }
        }
    }
    table
}

/// The most frequent entry. Strictly-greater comparison makes the first
/// encountered value win ties.
pub fn top_value(table: &[CategoryCount]) -> Option<CategoryCount> {
    let mut best: Option<&CategoryCount> = None;
    for entry in table {
        match best {
            Some(current) if entry.count <= current.count => {}
            _ => best = Some(entry),
        }
    }
    best.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BigMiss;
    use crate::stats::test_support::{rated_session, session_on};

    #[test]
    fn averages_follow_present_values_only() {
        // Two sessions; contact is absent from the second one.
        let records = vec![
            rated_session("2024-01-01", Some(3), Some(4), Some(2)),
            rated_session("2024-01-10", Some(5), None, Some(4)),
        ];
        let averages = rating_averages(&records);
        assert_eq!(averages.face_control, Some(4.00));
        assert_eq!(averages.contact, Some(4.00));
        assert_eq!(averages.confidence, Some(3.00));
    }

    #[test]
    fn averages_round_to_two_decimals() {
        let records = vec![
            rated_session("2024-01-01", Some(3), None, None),
            rated_session("2024-01-02", Some(4), None, None),
            rated_session("2024-01-03", Some(3), None, None),
        ];
        // 10 / 3 = 3.333...
        assert_eq!(rating_averages(&records).face_control, Some(3.33));
    }

    #[test]
    fn absent_everywhere_reports_no_data() {
        let records = vec![session_on("2024-01-01"), session_on("2024-01-02")];
        let averages = rating_averages(&records);
        assert_eq!(averages.face_control, None);
        assert_eq!(averages.contact, None);
        assert_eq!(averages.confidence, None);
    }

    #[test]
    fn out_of_range_rating_is_treated_as_absent() {
        let records = vec![
            rated_session("2024-01-01", Some(9), Some(4), None),
            rated_session("2024-01-02", Some(3), Some(0), None),
        ];
        let averages = rating_averages(&records);
        assert_eq!(averages.face_control, Some(3.00));
        assert_eq!(averages.contact, Some(4.00));
    }

    #[test]
    fn averages_are_order_invariant() {
        let mut records = vec![
            rated_session("2024-01-01", Some(2), Some(5), Some(1)),
            rated_session("2024-01-02", Some(4), None, Some(3)),
            rated_session("2024-01-03", Some(5), Some(1), None),
        ];
        let forward = rating_averages(&records);
        records.reverse();
        let backward = rating_averages(&records);
        assert_eq!(forward, backward);
    }

    #[test]
    fn recent_count_uses_trailing_window_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let records = vec![
            session_on("2024-03-01"), // 30 days back, inclusive
            session_on("2024-02-29"), // 31 days back
            session_on("2024-04-02"), // future-dated still counts
            session_on("garbage"),
        ];
        assert_eq!(recent_count(&records, today), 2);
    }

    #[test]
    fn tag_table_counts_each_tag_once_per_session() {
        let mut a = session_on("2024-01-01");
        a.tags = vec!["Driver".into(), "Putting".into()];
        let mut b = session_on("2024-01-02");
        b.tags = vec!["Driver".into()];

        let table = frequency_table(&[a, b], CategorySource::Tags);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0], CategoryCount { label: "Driver".into(), count: 2 });
        assert_eq!(table[1], CategoryCount { label: "Putting".into(), count: 1 });
    }

    #[test]
    fn miss_table_counts_lowercased_values() {
        let mut records = Vec::new();
        for miss in [BigMiss::Left, BigMiss::Left, BigMiss::Right] {
            let mut record = session_on("2024-01-01");
            record.big_miss = Some(miss);
            records.push(record);
        }
        let table = frequency_table(&records, CategorySource::BigMiss);
        assert_eq!(table[0], CategoryCount { label: "left".into(), count: 2 });
        assert_eq!(table[1], CategoryCount { label: "right".into(), count: 1 });
    }

    #[test]
    fn top_value_breaks_ties_by_first_appearance() {
        let table = vec![
            CategoryCount { label: "thin".into(), count: 2 },
            CategoryCount { label: "fat".into(), count: 2 },
        ];
        assert_eq!(top_value(&table).unwrap().label, "thin");
        assert!(top_value(&[]).is_none());
    }

    #[test]
    fn top_miss_scenario() {
        let mut records = Vec::new();
        for miss in [BigMiss::Left, BigMiss::Left, BigMiss::Right] {
            let mut record = session_on("2024-01-01");
            record.big_miss = Some(miss);
            records.push(record);
        }
        let table = frequency_table(&records, CategorySource::BigMiss);
        let top = top_value(&table).unwrap();
        assert_eq!(top.label, "left");
        assert_eq!(top.count, 2);
    }
}
