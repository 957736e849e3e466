//! Local persistence of the schedule and user preferences.
//!
//! Each record is a whole JSON file in the data directory, replaced on
//! every save (last write wins).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{PREFERENCES_KEY, SCHEDULE_KEY};
use crate::error::{GridError, GridResult};
use crate::selection::Selection;

/// The saved schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "selectedTalks", alias = "selection")]
    pub selection: Selection,
    pub timestamp: DateTime<Utc>,
}

impl ScheduleRecord {
    pub fn now(selection: Selection) -> Self {
        ScheduleRecord {
            selection,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(GridError::Config(format!(
                "Unknown theme '{other}'. Expected light or dark"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

/// Directory-backed key/value store.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Saved schedule, or `None` when absent or unreadable.
    pub fn load_schedule(&self) -> Option<ScheduleRecord> {
        self.read(SCHEDULE_KEY)
    }

    pub fn save_schedule(&self, record: &ScheduleRecord) -> GridResult<()> {
        self.write(SCHEDULE_KEY, record)
    }

    /// Saved preferences, falling back to the defaults.
    pub fn load_preferences(&self) -> Preferences {
        self.read(PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> GridResult<()> {
        self.write(PREFERENCES_KEY, preferences)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read record");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt record");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> GridResult<()> {
        let storage_err = |e: std::io::Error| GridError::Storage(format!("{}: {e}", self.dir.display()));

        std::fs::create_dir_all(&self.dir).map_err(storage_err)?;

        let path = self.path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        let content = serde_json::to_string_pretty(value)
            .map_err(|e| GridError::Serialization(e.to_string()))?;

        std::fs::write(&temp, content).map_err(storage_err)?;
        std::fs::rename(&temp, &path).map_err(storage_err)?;
        Ok(())
    }
}
