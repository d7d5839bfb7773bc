//! GraphQL object types wrapping the domain DTOs

use async_graphql::{Context, Object, Result};

use super::{into_graphql_error, state};
use crate::domain::DomainError;
use crate::models::{Like, Track, User};

/// A shared media reference posted by a user
pub struct TrackType(pub Track);

#[Object]
impl TrackType {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn url(&self) -> &str {
        &self.0.url
    }

    /// RFC 3339 creation timestamp
    async fn created_at(&self) -> &str {
        &self.0.created_at
    }

    /// The user who posted the track, if any
    async fn posted_by(&self, ctx: &Context<'_>) -> Result<Option<UserType>> {
        let Some(user_id) = self.0.posted_by else {
            return Ok(None);
        };
        let user = state(ctx)?
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(into_graphql_error)?;
        Ok(user.map(UserType))
    }

    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<LikeType>> {
        let likes = state(ctx)?
            .like_repo
            .find_by_track(self.0.id)
            .await
            .map_err(into_graphql_error)?;
        Ok(likes.into_iter().map(LikeType).collect())
    }

    async fn like_count(&self, ctx: &Context<'_>) -> Result<u64> {
        state(ctx)?
            .like_repo
            .count_by_track(self.0.id)
            .await
            .map_err(into_graphql_error)
    }
}

/// A user's endorsement of a track
pub struct LikeType(pub Like);

#[Object]
impl LikeType {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn created_at(&self) -> &str {
        &self.0.created_at
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<UserType> {
        state(ctx)?
            .user_repo
            .find_by_id(self.0.user_id)
            .await
            .and_then(|user| user.ok_or(DomainError::NotFound("User")))
            .map(UserType)
            .map_err(into_graphql_error)
    }

    async fn track(&self, ctx: &Context<'_>) -> Result<TrackType> {
        state(ctx)?
            .track_repo
            .find_by_id(self.0.track_id)
            .await
            .and_then(|track| track.ok_or(DomainError::NotFound("Track")))
            .map(TrackType)
            .map_err(into_graphql_error)
    }
}

/// An account. Password hashes are never exposed.
pub struct UserType(pub User);

#[Object]
impl UserType {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn date_joined(&self) -> &str {
        &self.0.date_joined
    }

    /// Tracks posted by this user, newest first
    async fn tracks(&self, ctx: &Context<'_>) -> Result<Vec<TrackType>> {
        let tracks = state(ctx)?
            .track_repo
            .find_by_owner(self.0.id)
            .await
            .map_err(into_graphql_error)?;
        Ok(tracks.into_iter().map(TrackType).collect())
    }

    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<LikeType>> {
        let likes = state(ctx)?
            .like_repo
            .find_by_user(self.0.id)
            .await
            .map_err(into_graphql_error)?;
        Ok(likes.into_iter().map(LikeType).collect())
    }
}
