//! Repository layer for database operations.
//!
//! Repositories are stateless: every operation receives the connection (or a
//! transaction) it runs against, keeps entities as plain data models, and
//! maps engine failures into [`crate::error::DaoError`].

pub mod account;
pub mod config;
pub mod pagination;

pub use account::{AccountField, AccountFilter, AccountPageQuery, AccountRepository, AccountUpdate};
pub use config::{ConfigFilter, ConfigRepository, ConfigUpdate};
pub use pagination::PageScope;
