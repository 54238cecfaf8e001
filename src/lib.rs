//! hui-dao - repository layer for accounts and key/value settings
//!
//! This library mediates between business logic and a SQLite store holding
//! user accounts (credentials, role, cumulative traffic counters) and
//! configuration entries.
//!
//! # Modules
//!
//! * [`config`] - Settings for the store and the logger
//! * [`entities`] - SeaORM entity models for the `account` and `config` tables
//! * [`repositories`] - Create-or-replace, partial update, lookup and listing
//! * [`storage`] - Connection pool and schema creation
//! * [`error`] - The not-found / storage-failure error taxonomy

/// Configuration module for managing application settings
pub mod config;

/// Constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error type returned by the repositories
pub mod error;

/// Logging setup for diagnostics
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Database connection management
pub mod storage;

pub use entities::{account, config as config_entry};
pub use error::{DaoError, DaoResult};
