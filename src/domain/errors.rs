//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Anonymous caller, or an authenticated caller acting on someone else's data
    #[error("{0}")]
    PermissionDenied(String),
    /// Lookup by primary key found nothing
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Validation error with message
    #[error("{0}")]
    Validation(String),
    /// Bad credentials or an unusable token
    #[error("{0}")]
    Authentication(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        DomainError::PermissionDenied(msg.into())
    }

    /// Machine-readable code surfaced to GraphQL clients.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::PermissionDenied(_) => "PERMISSION_DENIED",
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::Validation(_) => "BAD_USER_INPUT",
            DomainError::Authentication(_) => "UNAUTHENTICATED",
            DomainError::Database(_) | DomainError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
