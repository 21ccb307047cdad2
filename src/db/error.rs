use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors surfaced by the store and session layer.
///
/// Constraint violations get their own variants so callers can react to
/// them (retry with corrected data) without string-matching driver
/// messages; everything else passes through as [`StoreError::Db`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StoreError {
    pub(crate) fn classify(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ForeignKeyViolation(msg),
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::UniqueViolation(msg),
            _ => Self::Db(err),
        }
    }
}
