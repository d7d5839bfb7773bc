//! Like Service

use crate::domain::{DomainError, LikeRepository, TrackRepository, Viewer};
use crate::models::Like;

pub async fn list_likes(likes: &dyn LikeRepository) -> Result<Vec<Like>, DomainError> {
    likes.find_all().await
}

/// Like a track as the viewer. Liking the same track again returns the
/// existing like.
pub async fn create_like(
    likes: &dyn LikeRepository,
    tracks: &dyn TrackRepository,
    viewer: &Viewer,
    track_id: i32,
) -> Result<Like, DomainError> {
    let user = viewer.require_user("Login to like tracks!")?;

    if tracks.find_by_id(track_id).await?.is_none() {
        return Err(DomainError::NotFound("Track"));
    }

    let (like, created) = likes.get_or_create(user.id, track_id).await?;
    if created {
        tracing::info!("{} liked track {}", user.username, track_id);
    }
    Ok(like)
}
