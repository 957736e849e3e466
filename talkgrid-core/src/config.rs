//! Global talkgrid configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EVENT_DATE, DEFAULT_FALLBACK_END, DEFAULT_LOCATION, DEFAULT_PRODID,
    DEFAULT_SHARE_BASE_URL, DEFAULT_SLOT_END_TIMES, DEFAULT_UID_DOMAIN,
};
use crate::error::{GridError, GridResult};

static DEFAULT_CATALOG: &str = "./data/talks.json";

/// Configuration at ~/.config/talkgrid/config.toml
///
/// Every key is optional; `TALKGRID_*` environment variables override the file.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GridConfig {
    /// Path or http(s) URL of the talk catalog.
    pub catalog: String,

    /// Where the schedule and preference records are kept.
    /// Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    pub event_date: String,
    pub location: String,
    pub uid_domain: String,
    pub prodid: String,
    pub share_base_url: String,

    /// End time used when a slot has no table entry and no successor.
    pub fallback_end: String,

    pub slot_end_times: BTreeMap<String, String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            catalog: DEFAULT_CATALOG.to_string(),
            data_dir: None,
            event_date: DEFAULT_EVENT_DATE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            prodid: DEFAULT_PRODID.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            fallback_end: DEFAULT_FALLBACK_END.to_string(),
            slot_end_times: DEFAULT_SLOT_END_TIMES
                .iter()
                .map(|(start, end)| (start.to_string(), end.to_string()))
                .collect(),
        }
    }
}

impl GridConfig {
    pub fn config_path() -> GridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GridError::Config("Could not determine config directory".into()))?
            .join("talkgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/talkgrid/config.toml, writing a commented default on first run.
    pub fn load() -> GridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> GridResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TALKGRID"))
            .build()
            .map_err(|e| GridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GridError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GridResult<()> {
        let contents = format!(
            "\
# talkgrid configuration

# Talk catalog (file path or http(s) URL):
# catalog = \"{DEFAULT_CATALOG}\"

# Where your schedule is saved (defaults to the platform data directory):
# data_dir = \"~/.local/share/talkgrid\"

# Calendar export:
# event_date = \"{DEFAULT_EVENT_DATE}\"
# location = \"{DEFAULT_LOCATION}\"
# fallback_end = \"{DEFAULT_FALLBACK_END}\"

# Share links:
# share_base_url = \"{DEFAULT_SHARE_BASE_URL}\"

# [slot_end_times]
# \"10:00\" = \"10:50\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> GridResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => dirs::data_dir()
                .map(|d| d.join("talkgrid"))
                .ok_or_else(|| GridError::Config("Could not determine data directory".into())),
        }
    }

    /// Catalog location with `~` expanded for local paths.
    pub fn catalog_source(&self) -> String {
        if is_remote(&self.catalog) {
            self.catalog.clone()
        } else {
            shellexpand::tilde(&self.catalog).into_owned()
        }
    }

    pub fn event_date(&self) -> GridResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.event_date, "%Y-%m-%d").map_err(|_| {
            GridError::Config(format!(
                "Invalid event_date '{}'. Expected YYYY-MM-DD",
                self.event_date
            ))
        })
    }

    pub fn fallback_end(&self) -> GridResult<NaiveTime> {
        parse_clock(&self.fallback_end)
    }

    /// Effective settings rendered as TOML.
    pub fn to_toml(&self) -> GridResult<String> {
        toml::to_string_pretty(self).map_err(|e| GridError::Serialization(e.to_string()))
    }
}

pub(crate) fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse a slot key such as "10:00".
pub fn parse_clock(s: &str) -> GridResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| GridError::Config(format!("Invalid time '{s}'. Expected HH:MM")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_end_time_table() {
        let config = GridConfig::default();
        assert_eq!(config.slot_end_times.get("10:00").map(String::as_str), Some("10:50"));
        assert_eq!(config.slot_end_times.len(), 6);
        assert_eq!(config.fallback_end().unwrap(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "event_date = \"2026-05-02\"\nlocation = \"Hall A\"\n\n[slot_end_times]\n\"09:00\" = \"09:45\"\n",
        )
        .unwrap();

        let config = GridConfig::load_from(&path).unwrap();
        assert_eq!(config.event_date().unwrap(), NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
        assert_eq!(config.location, "Hall A");
        assert_eq!(config.slot_end_times.get("09:00").map(String::as_str), Some("09:45"));
        // Untouched keys keep their defaults
        assert_eq!(config.uid_domain, DEFAULT_UID_DOMAIN);
    }

    #[test]
    fn default_config_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        GridConfig::create_default_config(&path).unwrap();

        let config = GridConfig::load_from(&path).unwrap();
        assert_eq!(config.catalog, DEFAULT_CATALOG);
        assert_eq!(config.event_date, DEFAULT_EVENT_DATE);
    }

    #[test]
    fn remote_catalogs_are_not_tilde_expanded() {
        let config = GridConfig {
            catalog: "https://example.com/talks.json".into(),
            ..GridConfig::default()
        };
        assert_eq!(config.catalog_source(), "https://example.com/talks.json");
    }

    #[test]
    fn effective_settings_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = GridConfig {
            location: "Hall B".into(),
            ..GridConfig::default()
        };
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = GridConfig::load_from(&path).unwrap();
        assert_eq!(loaded.location, "Hall B");
        assert_eq!(loaded.slot_end_times, config.slot_end_times);
    }

    #[test]
    fn bad_event_date_is_a_config_error() {
        let config = GridConfig {
            event_date: "08/11/2025".into(),
            ..GridConfig::default()
        };
        assert!(matches!(config.event_date(), Err(GridError::Config(_))));
    }
}
