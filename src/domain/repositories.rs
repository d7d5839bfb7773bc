//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{Like, Track, User};

pub const TITLE_MAX_LEN: usize = 50;
pub const USERNAME_MAX_LEN: usize = 150;

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Filter criteria for track queries
#[derive(Debug, Default, Clone)]
pub struct TrackFilter {
    /// Case-insensitive substring matched against title OR description
    pub search: Option<String>,
}

impl TrackFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// The search term, ignoring blank input.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Input for creating or overwriting a track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInput {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl TrackInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title must not be blank".into()));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Title must be at most {} characters",
                TITLE_MAX_LEN
            )));
        }
        match url::Url::parse(&self.url) {
            Ok(parsed) if URL_SCHEMES.contains(&parsed.scheme()) => Ok(()),
            _ => Err(DomainError::Validation(format!(
                "Enter a valid URL: {}",
                self.url
            ))),
        }
    }
}

/// Input for registering a user, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A user together with the stored password hash, for credential checks only
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Repository trait for Track entity
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Find all tracks matching the filter, newest first
    async fn find_all(&self, filter: TrackFilter) -> Result<Vec<Track>, DomainError>;

    /// Find a single track by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Track>, DomainError>;

    /// Tracks posted by a user
    async fn find_by_owner(&self, user_id: i32) -> Result<Vec<Track>, DomainError>;

    /// Return the track with exactly these fields and owner, inserting it
    /// if missing. The flag is true when a row was inserted.
    async fn get_or_create(
        &self,
        input: TrackInput,
        owner: Option<i32>,
    ) -> Result<(Track, bool), DomainError>;

    /// Overwrite title, description and url
    async fn update(&self, id: i32, input: TrackInput) -> Result<Track, DomainError>;

    /// Delete a track and its likes
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Like entity
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Like>, DomainError>;

    async fn find_by_track(&self, track_id: i32) -> Result<Vec<Like>, DomainError>;

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Like>, DomainError>;

    async fn count_by_track(&self, track_id: i32) -> Result<u64, DomainError>;

    /// Idempotent like: returns the existing row for `(user, track)` if any.
    /// The flag is true when a row was inserted.
    async fn get_or_create(&self, user_id: i32, track_id: i32)
    -> Result<(Like, bool), DomainError>;
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Lookup including the password hash, for login
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;

    /// Insert a user; duplicate usernames are a validation error
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, url: &str) -> TrackInput {
        TrackInput {
            title: title.to_string(),
            description: "desc".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_track_input_accepts_web_urls() {
        assert!(input("Song", "https://example.com/song.mp3").validate().is_ok());
        assert!(input("Song", "ftp://files.example.com/a.ogg").validate().is_ok());
    }

    #[test]
    fn test_track_input_rejects_bad_fields() {
        assert!(input("   ", "https://example.com").validate().is_err());
        assert!(input(&"x".repeat(51), "https://example.com").validate().is_err());
        assert!(input("Song", "not a url").validate().is_err());
        assert!(input("Song", "mailto:someone@example.com").validate().is_err());
    }

    #[test]
    fn test_title_limit_counts_characters() {
        assert!(input(&"é".repeat(50), "https://example.com").validate().is_ok());
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        assert_eq!(TrackFilter::search("  ").term(), None);
        assert_eq!(TrackFilter::search(" rock ").term(), Some("rock"));
        assert_eq!(TrackFilter::default().term(), None);
    }
}
