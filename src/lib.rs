mod db;
mod models;
mod settings;
pub mod stats;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use log::info;

pub use db::Database;
pub use models::{BigMiss, LocationType, NewSession, SessionPatch, SessionRecord};
pub use settings::{DashboardPrefs, SettingsStore};
pub use stats::{
    compute_stats, CategoryCount, RatingAverages, SeriesPoint, SessionFilter, StatsQuery,
    StatsReport, Window,
};

/// Application handle: the session store plus the saved dashboard settings.
///
/// All methods delegate to the store or to the pure stats engine; the handle
/// itself holds no derived state, so every stats call reflects the current
/// records.
pub struct PracticeLog {
    db: Database,
    settings: SettingsStore,
}

impl PracticeLog {
    /// Open (or create) the log under the given data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let db = Database::new(data_dir.join("rangelog.sqlite3"))?;
        let settings = SettingsStore::new(data_dir.join("settings.json"))?;

        info!("Practice log opened at {}", data_dir.display());

        Ok(Self { db, settings })
    }

    pub async fn log_session(&self, input: NewSession) -> Result<SessionRecord> {
        self.db.insert_session(input).await
    }

    /// All sessions, newest first (display order).
    pub async fn sessions(&self) -> Result<Vec<SessionRecord>> {
        self.db.list_sessions().await
    }

    pub async fn session(&self, session_id: &str) -> Result<SessionRecord> {
        self.db.get_session(session_id).await
    }

    pub async fn update_session(
        &self,
        session_id: &str,
        patch: SessionPatch,
    ) -> Result<SessionRecord> {
        self.db.update_session(session_id, patch).await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.db.delete_session(session_id).await
    }

    /// Run the stats engine over the current snapshot with an explicit query.
    pub async fn stats(&self, query: &StatsQuery) -> Result<StatsReport> {
        let records = self.db.list_sessions_chronological().await?;
        let today = Utc::now().date_naive();
        Ok(compute_stats(&records, query, today))
    }

    /// Run the stats engine with the saved dashboard preferences.
    pub async fn dashboard_stats(&self) -> Result<StatsReport> {
        let query = self.settings.dashboard().to_query();
        self.stats(&query).await
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }
}
