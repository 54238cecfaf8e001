//! Storage engine handle.
//!
//! Owns the single connection pool shared by every repository and creates
//! the `account` and `config` tables on startup.

pub mod db;

pub use db::Storage;
