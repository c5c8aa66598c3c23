use super::env::{get_env_or, get_non_empty_env};
use std::path::PathBuf;

pub const DATABASE_PATH_ENV: &str = "CERT_WALLET_DATABASE_PATH";
pub const LOG_FILTER_ENV: &str = "CERT_WALLET_LOG";

const DEFAULT_DATABASE_FILE: &str = "wallet.db";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct WalletConfig {
    /// `None` keeps all persisted state in memory.
    pub database_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            database_path: Some(default_database_path()),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl WalletConfig {
    pub fn new(database_path: Option<PathBuf>, log_filter: String) -> Self {
        Self {
            database_path,
            log_filter,
        }
    }

    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let database_path = get_non_empty_env(DATABASE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);
        Self {
            database_path: Some(database_path),
            log_filter: get_env_or(LOG_FILTER_ENV, DEFAULT_LOG_FILTER),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn with_database_path(mut self, database_path: PathBuf) -> Self {
        self.database_path = Some(database_path);
        self
    }
}

/// `wallet.db` in the platform data directory, or in the working directory
/// when the platform has none.
pub fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "certwallet", "wallet")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
}
