use std::path::PathBuf;

use rangelog::{
    BigMiss, LocationType, NewSession, PracticeLog, SessionFilter, SessionPatch, StatsQuery,
    Window,
};
use rangelog::stats::FilterField;
use uuid::Uuid;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let path = std::env::temp_dir().join(format!("rangelog-test-{}", Uuid::new_v4()));
        Self(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn range_session(date: &str) -> NewSession {
    NewSession {
        session_date: date.into(),
        location_type: Some(LocationType::Range),
        big_miss: Some(BigMiss::Left),
        face_control_rating: Some(3),
        contact_rating: Some(4),
        confidence_rating: Some(2),
        tags: vec!["Driver".into(), "Putting".into()],
        ..Default::default()
    }
}

#[tokio::test]
async fn create_list_update_delete_round_trip() {
    let dir = TempDir::new();
    let log = PracticeLog::open(&dir.0).unwrap();

    let created = log.log_session(range_session("2024-03-01")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.session_date, "2024-03-01");
    assert_eq!(created.location_type, Some(LocationType::Range));
    assert_eq!(created.tags, vec!["Driver", "Putting"]);

    log.log_session(range_session("2024-03-05")).await.unwrap();

    // Display order is newest first.
    let listed = log.sessions().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].session_date, "2024-03-05");

    let patch = SessionPatch {
        notes: Some(Some("stock 7i felt great".into())),
        big_miss: Some(None),
        contact_rating: Some(Some(5)),
        ..Default::default()
    };
    let updated = log.update_session(&created.id, patch).await.unwrap();
    assert_eq!(updated.notes.as_deref(), Some("stock 7i felt great"));
    assert_eq!(updated.big_miss, None);
    assert_eq!(updated.contact_rating, Some(5));
    // Untouched fields survive the patch.
    assert_eq!(updated.session_date, "2024-03-01");
    assert_eq!(updated.face_control_rating, Some(3));

    log.delete_session(&created.id).await.unwrap();
    assert_eq!(log.sessions().await.unwrap().len(), 1);
    assert!(log.session(&created.id).await.is_err());
}

#[tokio::test]
async fn store_rejects_invalid_input() {
    let dir = TempDir::new();
    let log = PracticeLog::open(&dir.0).unwrap();

    let mut bad_rating = range_session("2024-03-01");
    bad_rating.confidence_rating = Some(9);
    assert!(log.log_session(bad_rating).await.is_err());

    let mut bad_date = range_session("2024-03-01");
    bad_date.session_date = "yesterday".into();
    assert!(log.log_session(bad_date).await.is_err());

    assert!(log.sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn stats_run_over_stored_records() {
    let dir = TempDir::new();
    let log = PracticeLog::open(&dir.0).unwrap();

    log.log_session(range_session("2024-03-01")).await.unwrap();
    log.log_session(range_session("2024-03-05")).await.unwrap();
    let mut course = range_session("2024-03-09");
    course.location_type = Some(LocationType::Course);
    course.big_miss = Some(BigMiss::Right);
    course.tags = vec!["On-Course".into()];
    log.log_session(course).await.unwrap();

    let report = log.stats(&StatsQuery::default()).await.unwrap();
    assert_eq!(report.total_count, 3);
    assert_eq!(report.series.len(), 3);
    assert_eq!(report.series[0].session_date, "2024-03-01");
    assert_eq!(report.top_miss.as_ref().unwrap().label, "left");
    assert_eq!(report.averages.face_control, Some(3.00));

    let range_only = StatsQuery {
        filter: Some(SessionFilter::new(FilterField::LocationType, "range")),
        window: Window::All,
    };
    let report = log.stats(&range_only).await.unwrap();
    assert_eq!(report.total_count, 2);
    assert_eq!(report.top_tags[0].label, "Driver");

    let windowed = StatsQuery {
        filter: None,
        window: Window::Last(1),
    };
    let report = log.stats(&windowed).await.unwrap();
    assert_eq!(report.total_count, 1);
    assert_eq!(report.series[0].session_date, "2024-03-09");
}

#[tokio::test]
async fn dashboard_stats_use_saved_preferences() {
    let dir = TempDir::new();
    let log = PracticeLog::open(&dir.0).unwrap();

    log.log_session(range_session("2024-03-01")).await.unwrap();
    let mut course = range_session("2024-03-05");
    course.location_type = Some(LocationType::Course);
    log.log_session(course).await.unwrap();

    // Defaults: no filtering, all sessions.
    let report = log.dashboard_stats().await.unwrap();
    assert_eq!(report.total_count, 2);

    log.settings()
        .update_dashboard(rangelog::DashboardPrefs {
            window: Window::All,
            filter_field: "location_type".into(),
            filter_value: "course".into(),
        })
        .unwrap();

    let report = log.dashboard_stats().await.unwrap();
    assert_eq!(report.total_count, 1);
}

#[tokio::test]
async fn tolerant_row_decoding_survives_foreign_writes() {
    let dir = TempDir::new();
    let log = PracticeLog::open(&dir.0).unwrap();
    log.log_session(range_session("2024-03-01")).await.unwrap();

    // Another writer (or an older schema) left values our enums don't know.
    let conn = rusqlite::Connection::open(dir.0.join("rangelog.sqlite3")).unwrap();
    conn.execute(
        "INSERT INTO sessions (id, session_date, location_type, big_miss, face_control_rating, \
         tags, created_at, updated_at)
         VALUES ('foreign', '2024-03-02', 'garage', 'shank', 400, 'not json', \
         '2024-03-02T08:00:00+00:00', '2024-03-02T08:00:00+00:00')",
        [],
    )
    .unwrap();
    drop(conn);

    let listed = log.sessions().await.unwrap();
    assert_eq!(listed.len(), 2);
    let foreign = listed.iter().find(|s| s.id == "foreign").unwrap();
    assert_eq!(foreign.location_type, None);
    assert_eq!(foreign.big_miss, None);
    assert_eq!(foreign.face_control_rating, None);
    assert!(foreign.tags.is_empty());

    // The odd row still participates in stats without crashing anything.
    let report = log.stats(&StatsQuery::default()).await.unwrap();
    assert_eq!(report.total_count, 2);
}
