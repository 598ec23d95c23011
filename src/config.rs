//! Database configuration
//!
//! Resolved from `ALKEMY_*` environment variables, falling back to a SQLite
//! file in the platform data directory (or next to the executable in
//! portable mode).

use std::path::{Path, PathBuf};
use std::time::Duration;

use sea_orm::ConnectOptions;
use url::Url;

use crate::error::{DataError, DataResult};

pub const ENV_DATABASE_URL: &str = "ALKEMY_DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "ALKEMY_DB_MAX_CONNECTIONS";
pub const ENV_BACKUP_DIR: &str = "ALKEMY_BACKUP_DIR";
pub const ENV_SQLX_LOGGING: &str = "ALKEMY_SQLX_LOGGING";
pub const ENV_LOG_LEVEL: &str = "ALKEMY_LOG";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    /// Let sqlx log every statement
    pub sqlx_logging: bool,
    /// Where hot backups go; the default data directory when unset
    pub backup_dir: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Configuration for a connection string.
    ///
    /// A local SQLite store needs a single connection; this is also what keeps
    /// an in-memory database alive for the lifetime of the pool.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            sqlx_logging: false,
            backup_dir: None,
        }
    }

    /// Configuration for a SQLite file, created on first connection.
    pub fn for_path(path: &Path) -> DataResult<Self> {
        let db_url = Url::from_file_path(path).map_err(|_| {
            DataError::Config(format!("Invalid database path: {}", path.display()))
        })?;
        Ok(Self::new(format!("sqlite:{}?mode=rwc", db_url.path())))
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Reads the process environment.
    pub fn from_env() -> DataResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> DataResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_DATABASE_URL).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(url.trim()),
            None => {
                let db_path = alkemy_path::get_db_path().map_err(DataError::Config)?;
                Self::for_path(&db_path)?
            }
        };

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            let max = raw.trim().parse::<u32>().map_err(|e| {
                DataError::Config(format!("{} must be a positive integer: {}", ENV_MAX_CONNECTIONS, e))
            })?;
            if max == 0 {
                return Err(DataError::Config(format!(
                    "{} must be a positive integer",
                    ENV_MAX_CONNECTIONS
                )));
            }
            config.max_connections = max;
            config.min_connections = config.min_connections.min(max);
        }

        if let Some(dir) = lookup(ENV_BACKUP_DIR).filter(|v| !v.trim().is_empty()) {
            config.backup_dir = Some(PathBuf::from(dir.trim()));
        }

        if let Some(flag) = lookup(ENV_SQLX_LOGGING) {
            config.sqlx_logging = matches!(
                flag.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(config)
    }

    /// Backup directory, defaulting to `data/backups` under the data directory.
    pub fn resolve_backup_dir(&self) -> DataResult<PathBuf> {
        match &self.backup_dir {
            Some(dir) => Ok(dir.clone()),
            None => alkemy_path::get_default_db_backup_path().map_err(DataError::Config),
        }
    }

    /// SQLite file behind the URL, `None` for in-memory or non-file URLs.
    pub fn sqlite_file(&self) -> Option<PathBuf> {
        let rest = self.url.strip_prefix("sqlite:")?;
        if rest.starts_with(":memory:") {
            return None;
        }
        let path = rest.split('?').next().unwrap_or(rest);
        let path = path.strip_prefix("//").unwrap_or(path);
        if path.is_empty() {
            return None;
        }
        // absolute paths come percent-encoded from `for_path`
        if path.starts_with('/') {
            if let Some(decoded) = Url::parse(&format!("file://{}", path))
                .ok()
                .and_then(|url| url.to_file_path().ok())
            {
                return Some(decoded);
            }
        }
        Some(PathBuf::from(path))
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .sqlx_logging(self.sqlx_logging);
        options
    }
}
