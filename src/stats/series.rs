use crate::models::SessionRecord;
use crate::stats::aggregate::usable_rating;
use crate::stats::types::SeriesPoint;

/// Reshape the scoped sequence into chart points, one per session, order
/// preserved. Lossless: no aggregation happens here, so the plotted series
/// always matches the averages computed over the same sequence.
pub fn chart_series(records: &[SessionRecord]) -> Vec<SeriesPoint> {
    records
        .iter()
        .map(|record| SeriesPoint {
            session_date: record.session_date.clone(),
            face_control: usable_rating(record.face_control_rating),
            contact: usable_rating(record.contact_rating),
            confidence: usable_rating(record.confidence_rating),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::rated_session;

    #[test]
    fn one_point_per_record_in_order() {
        let records = vec![
            rated_session("2024-01-01", Some(3), Some(4), Some(2)),
            rated_session("2024-01-10", Some(5), None, Some(4)),
        ];
        let series = chart_series(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].session_date, "2024-01-01");
        assert_eq!(series[1].session_date, "2024-01-10");
        assert_eq!(series[1].face_control, Some(5));
    }

    #[test]
    fn missing_and_invalid_ratings_stay_absent() {
        let records = vec![rated_session("2024-01-01", None, Some(7), Some(3))];
        let series = chart_series(&records);
        assert_eq!(series[0].face_control, None);
        assert_eq!(series[0].contact, None);
        assert_eq!(series[0].confidence, Some(3));
    }
}
