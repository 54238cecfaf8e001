//! Error type shared by the repositories.

use sea_orm::DbErr;

/// Errors surfaced by repository operations.
///
/// Lookups that match nothing report a record-specific not-found kind. Every
/// other failure is collapsed into [`DaoError::Storage`]; the engine error is
/// kept as the source so it can be inspected, but callers should treat it as
/// one opaque failure.
#[derive(Debug, thiserror::Error)]
pub enum DaoError {
    #[error("account does not exist")]
    AccountNotFound,

    #[error("config does not exist")]
    ConfigNotFound,

    #[error("system error")]
    Storage(#[source] DbErr),
}

impl DaoError {
    /// Whether this error reports an absent record rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound | Self::ConfigNotFound)
    }
}

impl From<DbErr> for DaoError {
    fn from(err: DbErr) -> Self {
        log::error!("storage failure: {err}");
        Self::Storage(err)
    }
}

pub type DaoResult<T> = std::result::Result<T, DaoError>;
