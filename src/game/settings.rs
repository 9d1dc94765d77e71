use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::suggestion_engine::SUGGESTION_LIMIT;

const SETTINGS_FILE: &str = "settings.json";
const DATA_DIR_NAME: &str = "marquee";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub(crate) version: u32,

    #[serde(default = "default_true")]
    pub suggestions_enabled: bool,

    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    #[serde(default = "default_true")]
    pub show_stats_on_finish: bool,
}

fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_suggestion_limit() -> usize {
    SUGGESTION_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            suggestions_enabled: true,
            suggestion_limit: SUGGESTION_LIMIT,
            show_stats_on_finish: true,
        }
    }
}

impl Settings {
    pub fn load_from(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
            warn!(target: "settings", "Ignoring unreadable settings at {}", path.display());
        }
        let default = Settings::default();
        if let Err(e) = default.save_to(data_dir) {
            warn!(target: "settings", "Could not write default settings: {}", e);
        }
        default
    }

    pub fn save_to(&self, data_dir: &Path) -> Result<(), std::io::Error> {
        fs::create_dir_all(data_dir)?;
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(data_dir.join(SETTINGS_FILE), contents)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
        if self.suggestion_limit == 0 {
            self.suggestion_limit = SUGGESTION_LIMIT;
        }
    }

    pub fn is_debug_mode() -> bool {
        env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    /// `MARQUEE_PUZZLE` pins a specific corpus position instead of today's.
    pub fn puzzle_override_from_env() -> Option<i64> {
        let raw = env::var("MARQUEE_PUZZLE").ok()?;
        match raw.trim().parse::<i64>() {
            Ok(index) => Some(index),
            Err(_) => {
                warn!(target: "settings", "Ignoring MARQUEE_PUZZLE={:?}: not an integer", raw);
                None
            }
        }
    }

    pub fn corpus_path_from_env() -> Option<PathBuf> {
        env::var_os("MARQUEE_CORPUS").map(PathBuf::from)
    }

    /// `MARQUEE_DATA_DIR` if set, otherwise `marquee` under the platform's
    /// user data directory.
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = env::var_os("MARQUEE_DATA_DIR") {
            return PathBuf::from(dir);
        }
        match dirs::data_dir() {
            Some(dir) => dir.join(DATA_DIR_NAME),
            None => {
                let dir = env::temp_dir().join(DATA_DIR_NAME);
                warn!(target: "settings", "No user data directory, falling back to {}", dir.display());
                dir
            }
        }
    }
}
