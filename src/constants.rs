//! Constants used throughout the crate
//!
//! Names of files, default connection strings and well-known values.

pub const APP_NAME: &str = "hui-dao";

// Files
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "hui-dao.toml";
pub const LOG_FILE_NAME: &str = "hui-dao.log";

// Database
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hui-dao.db?mode=rwc";
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Quota value meaning "no traffic limit"
pub const UNLIMITED_QUOTA: i64 = -1;

// Messages
pub const CONFIG_GENERATED: &str = "Default configuration written";
