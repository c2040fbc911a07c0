//! Application configuration: a JSON file in the user config dir plus
//! environment-variable overrides for the data paths.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::focus::{Key, Keymap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Key-value store location.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Schedule JSON file for the schedule view.
    #[serde(default = "default_schedule_path")]
    pub schedule_path: PathBuf,

    /// Line-oriented log file for the system view.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// List-navigation key overrides, e.g. `{"k": "up", "j": "down"}`.
    /// Empty means the stock vi mapping.
    #[serde(default)]
    pub keys: HashMap<String, String>,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deck")
}

fn default_db_path() -> PathBuf {
    data_dir().join("data.db")
}

fn default_schedule_path() -> PathBuf {
    data_dir().join("schedule.json")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("/var/log/syslog")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            schedule_path: default_schedule_path(),
            log_path: default_log_path(),
            keys: HashMap::new(),
        }
    }
}

impl Config {
    /// Load from `<config dir>/deck/config.json` (defaults when absent),
    /// then apply `DECK_DB`, `DECK_SCHEDULE` and `DECK_LOG` overrides.
    pub fn load() -> Result<Self> {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("deck")
            .join("config.json");

        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)
                .map_err(|e| anyhow!("failed to parse {}: {}", path.display(), e))?
        } else {
            Self::default()
        };

        if let Ok(db) = std::env::var("DECK_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Ok(schedule) = std::env::var("DECK_SCHEDULE") {
            config.schedule_path = PathBuf::from(schedule);
        }
        if let Ok(log) = std::env::var("DECK_LOG") {
            config.log_path = PathBuf::from(log);
        }

        Ok(config)
    }

    /// The input-translation table handed to the root router. Configured
    /// overrides replace the stock mapping entirely.
    pub fn keymap(&self) -> Keymap {
        if self.keys.is_empty() {
            return Keymap::vi_lists();
        }
        let mut keymap = Keymap::empty();
        for (from, to) in &self.keys {
            match (parse_key(from), parse_key(to)) {
                (Some(from), Some(to)) => keymap = keymap.remap(from, to),
                _ => tracing::warn!(from, to, "ignoring unparseable key override"),
            }
        }
        keymap
    }
}

fn parse_key(name: &str) -> Option<Key> {
    match name {
        "up" => Some(Key::Up),
        "down" => Some(Key::Down),
        "left" => Some(Key::Left),
        "right" => Some(Key::Right),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
    }
}
