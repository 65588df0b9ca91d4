//! Repository error types.

use artisan_cache::CacheError;
use artisan_commerce::CommerceError;
use thiserror::Error;

/// Errors returned by repositories and the storefront service.
#[derive(Error, Debug)]
pub enum RepoError {
    /// The requested record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: u64 },

    /// The write clashes with an existing record (e.g., a taken shop slug).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Seed data failed to parse.
    #[error("Invalid fixture data: {0}")]
    Fixture(String),

    /// Persisted records could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Domain rule violation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl RepoError {
    pub fn not_found(kind: &'static str, id: impl Into<u64>) -> Self {
        RepoError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether the caller may offer a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepoError::NotFound { .. } | RepoError::Storage(_))
    }
}

impl From<CacheError> for RepoError {
    fn from(e: CacheError) -> Self {
        RepoError::Storage(e.to_string())
    }
}
