use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "mathfun";
const LOG_FILE: &str = "mathfun.log";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where runtime state such as the log file lives
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join(LOG_FILE))
    }
}
