/// Failure taxonomy shared by every service function.
///
/// Three flat kinds: the routing layer maps `Validation` to a client
/// error, `NotFound` to a missing resource, and `Unexpected` to a
/// server failure. A record that exists but is owned by someone else
/// is reported as `NotFound`, never distinguished.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::new(err))
    }
}

/// True when the store rejected an insert/update on a UNIQUE constraint
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// True when the store rejected a write on a FOREIGN KEY constraint
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}
