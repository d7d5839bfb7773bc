//! The requester of an operation

use super::DomainError;
use crate::models::User;

/// Who is making the request. Resolved once per HTTP request from the
/// `Authorization` header and handed to every resolver.
#[derive(Debug, Clone, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(User),
}

impl Viewer {
    pub fn user(&self) -> Option<&User> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(user) => Some(user),
        }
    }

    /// The authenticated user, or a permission error carrying `msg`.
    pub fn require_user(&self, msg: &str) -> Result<&User, DomainError> {
        self.user()
            .ok_or_else(|| DomainError::permission_denied(msg))
    }
}
