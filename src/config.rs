use crate::error::{MathFunError, Result};
use crate::grade::Grade;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMER_SECS: u32 = 120;
pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_grade: Grade,
    /// Length of a timed drill
    pub timer_secs: u32,
    /// Pause between a timed answer and the next question
    pub auto_advance_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_grade: Grade::default(),
            timer_secs: DEFAULT_TIMER_SECS,
            auto_advance_ms: DEFAULT_AUTO_ADVANCE_MS,
        }
    }
}

impl Config {
    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    /// Drill length, never zero so a timed drill always ends
    pub fn drill_secs(&self) -> u32 {
        self.timer_secs.max(1)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "mathfun") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("mathfun_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing file means defaults; an unreadable or malformed one is logged
    /// and also falls back to defaults.
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read config");
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        let io_err = |source| MathFunError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| MathFunError::Json {
            what: "config".into(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            default_grade: Grade::new(3).unwrap(),
            timer_secs: 60,
            auto_advance_ms: 250,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_or_out_of_range_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());

        fs::write(&path, br#"{"default_grade": 9}"#).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"timer_secs": 30}"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.timer_secs, 30);
        assert_eq!(cfg.default_grade, Grade::default());
        assert_eq!(cfg.auto_advance(), Duration::from_millis(500));
    }

    #[test]
    fn zero_timer_still_ends() {
        let cfg = Config {
            timer_secs: 0,
            ..Config::default()
        };
        assert_eq!(cfg.drill_secs(), 1);
    }
}
