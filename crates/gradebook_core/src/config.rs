//! Runtime configuration for the gradebook core.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//! - Open the configured database and optional logging in one call.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Logging is only initialized when a log directory is configured.

use crate::db::{open_db, DbResult};
use crate::logging::{default_log_level, init_logging};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GRADEBOOK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GRADEBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GRADEBOOK_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "gradebook.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradebookConfig {
    /// SQLite file holding the `students` and `grades` slots.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl GradebookConfig {
    /// Reads `GRADEBOOK_DB_PATH`, `GRADEBOOK_LOG_LEVEL` and `GRADEBOOK_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(LOG_LEVEL_ENV).ok(),
            std::env::var(LOG_DIR_ENV).ok(),
        )
    }

    /// Builds a config from raw optional values, applying defaults.
    ///
    /// - `db_path` defaults to `<temp_dir>/gradebook.sqlite3`.
    /// - `log_level` defaults to [`default_log_level`].
    pub fn from_values(
        db_path: Option<String>,
        log_level: Option<String>,
        log_dir: Option<String>,
    ) -> Self {
        Self {
            db_path: non_blank(db_path)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(log_level).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(log_dir).map(PathBuf::from),
        }
    }

    /// Returns a copy pointing at a different database file.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

/// Starts logging if configured, then opens the configured database.
///
/// A logging setup failure is not fatal; the database still opens.
pub fn open_gradebook_db(config: &GradebookConfig) -> DbResult<Connection> {
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            warn!("event=config_logging module=config status=error error={err}");
        }
    }
    open_db(&config.db_path)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
