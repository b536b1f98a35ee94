//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one `fast-travel` session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content directory holding `config.toml`, `catalog.ron`, and the maps.
    pub data_dir: PathBuf,
    /// Catalog save directory; `None` picks the platform data directory.
    pub save_dir: Option<PathBuf>,
    pub enable_persistence: bool,
    pub session_id: Option<String>,
    /// Deadline for a single travel, including its map transition.
    pub travel_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/game/content/data"),
            save_dir: None,
            enable_persistence: false,
            session_id: None,
            travel_timeout: Duration::from_millis(2_000),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FAST_TRAVEL_DATA_DIR` - Content directory (default: crates/game/content/data)
    /// - `FAST_TRAVEL_SAVE_DIR` - Catalog save directory (default: platform-specific)
    /// - `FAST_TRAVEL_TIMEOUT_MS` - Per-travel deadline in milliseconds (default: 2000)
    /// - `ENABLE_PERSISTENCE` - Save recorded visits between sessions (default: false)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("FAST_TRAVEL_DATA_DIR") {
            config.data_dir = dir;
        }
        config.save_dir = read_env::<PathBuf>("FAST_TRAVEL_SAVE_DIR");

        if let Some(millis) = read_env::<u64>("FAST_TRAVEL_TIMEOUT_MS") {
            config.travel_timeout = Duration::from_millis(millis.max(1));
        }

        if let Some(enable) = read_env::<bool>("ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        } else if env::var("ENABLE_PERSISTENCE").is_ok() {
            // A bare `ENABLE_PERSISTENCE=` counts as on.
            config.enable_persistence = true;
        }

        config.session_id = env::var("GAME_SESSION_ID").ok();
        config
    }

    /// Directory the catalog is saved under when persistence is on.
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "fast-travel")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data"))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_save_dir_wins() {
        let config = ClientConfig {
            save_dir: Some(PathBuf::from("/srv/saves")),
            ..ClientConfig::default()
        };

        assert_eq!(config.resolved_save_dir(), PathBuf::from("/srv/saves"));
    }

    #[test]
    fn defaults_keep_persistence_off() {
        let config = ClientConfig::default();

        assert!(!config.enable_persistence);
        assert_eq!(config.travel_timeout, Duration::from_secs(2));
    }
}
