use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::stats::{FilterField, SessionFilter, StatsQuery, Window};

/// Saved dashboard controls: the selected window and categorical filter.
/// These are the "current UI selection" made explicit — the stats engine only
/// ever sees the typed query they convert into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPrefs {
    pub window: Window,
    pub filter_field: String,
    pub filter_value: String,
}

impl Default for DashboardPrefs {
    fn default() -> Self {
        Self {
            window: Window::All,
            filter_field: "location_type".into(),
            filter_value: "all".into(),
        }
    }
}

impl DashboardPrefs {
    /// Convert the saved strings into a typed engine query. An unrecognized
    /// filter field disables filtering instead of failing the dashboard.
    pub fn to_query(&self) -> StatsQuery {
        let filter = match FilterField::parse(&self.filter_field) {
            Some(field) => Some(SessionFilter::new(field, self.filter_value.clone())),
            None => {
                warn!(
                    "unknown filter field '{}'; filtering disabled",
                    self.filter_field
                );
                None
            }
        };
        StatsQuery {
            filter,
            window: self.window,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    dashboard: DashboardPrefs,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn dashboard(&self) -> DashboardPrefs {
        self.data.read().unwrap().dashboard.clone()
    }

    pub fn update_dashboard(&self, prefs: DashboardPrefs) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.dashboard = prefs;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
