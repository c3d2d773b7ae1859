use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failures surfaced by every store implementation.
///
/// Constraint violations are classified so the API layer can map them to
/// client errors; anything else stays an opaque driver error.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique constraint rejected the write (duplicate `match_id`, `username`, ...).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("database error")]
    Db(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                return RepoError::Conflict(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::InvalidReference(constraint);
            }
        }
        RepoError::Db(e)
    }
}
