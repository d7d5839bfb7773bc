//! Track Service - business rules for tracks, independent of GraphQL
//!
//! Resolvers call into these functions with the requester; ownership and
//! authentication checks live here so every entry point shares them.

use crate::domain::{DomainError, TrackFilter, TrackInput, TrackRepository, Viewer};
use crate::models::Track;

/// List tracks, optionally narrowed by a case-insensitive search term
pub async fn list_tracks(
    tracks: &dyn TrackRepository,
    search: Option<String>,
) -> Result<Vec<Track>, DomainError> {
    tracing::debug!("List tracks - search={:?}", search);
    tracks.find_all(TrackFilter { search }).await
}

pub async fn get_track(tracks: &dyn TrackRepository, id: i32) -> Result<Track, DomainError> {
    tracks
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound("Track"))
}

/// Get-or-create: an identical submission by the same owner returns the
/// existing row.
pub async fn create_track(
    tracks: &dyn TrackRepository,
    viewer: &Viewer,
    input: TrackInput,
) -> Result<Track, DomainError> {
    let user = viewer.require_user("Log in to add a track!")?;
    input.validate()?;

    let (track, created) = tracks.get_or_create(input, Some(user.id)).await?;
    if created {
        tracing::info!("Track {} created by {}", track.id, user.username);
    } else {
        tracing::info!(
            "Track {} already exists for {}, returning it",
            track.id,
            user.username
        );
    }
    Ok(track)
}

/// Look up a track the viewer is allowed to modify
async fn owned_track(
    tracks: &dyn TrackRepository,
    viewer: &Viewer,
    id: i32,
    action: &str,
) -> Result<Track, DomainError> {
    let denied =
        || DomainError::permission_denied(format!("Not permitted to {} this track.", action));

    let user = viewer.user().ok_or_else(denied)?;
    let track = get_track(tracks, id).await?;

    if !track.is_owned_by(user.id) {
        tracing::warn!(
            "User {} tried to {} track {} owned by {:?}",
            user.username,
            action,
            track.id,
            track.posted_by
        );
        return Err(denied());
    }
    Ok(track)
}

/// Owner-only full overwrite of title, description and url
pub async fn update_track(
    tracks: &dyn TrackRepository,
    viewer: &Viewer,
    id: i32,
    input: TrackInput,
) -> Result<Track, DomainError> {
    owned_track(tracks, viewer, id, "update").await?;
    input.validate()?;

    let track = tracks.update(id, input).await?;
    tracing::info!("Track {} updated", track.id);
    Ok(track)
}

/// Owner-only hard delete. Returns the deleted id.
pub async fn delete_track(
    tracks: &dyn TrackRepository,
    viewer: &Viewer,
    id: i32,
) -> Result<i32, DomainError> {
    owned_track(tracks, viewer, id, "delete").await?;

    tracks.delete(id).await?;
    tracing::info!("Track {} deleted", id);
    Ok(id)
}
