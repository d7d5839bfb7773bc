use async_graphql::{Context, Object, Result, SimpleObject};

use super::{TrackType, into_graphql_error, state, viewer};
use crate::domain::TrackInput;
use crate::services::track_service;

#[derive(Default)]
pub struct TrackQuery;

#[Object]
impl TrackQuery {
    /// All tracks, newest first. `search` matches title or description,
    /// case-insensitively.
    async fn tracks(&self, ctx: &Context<'_>, search: Option<String>) -> Result<Vec<TrackType>> {
        let tracks = track_service::list_tracks(state(ctx)?.track_repo.as_ref(), search)
            .await
            .map_err(into_graphql_error)?;
        Ok(tracks.into_iter().map(TrackType).collect())
    }

    async fn track(&self, ctx: &Context<'_>, id: i32) -> Result<TrackType> {
        track_service::get_track(state(ctx)?.track_repo.as_ref(), id)
            .await
            .map(TrackType)
            .map_err(into_graphql_error)
    }
}

#[derive(SimpleObject)]
pub struct CreateTrackPayload {
    track: TrackType,
}

#[derive(SimpleObject)]
pub struct UpdateTrackPayload {
    track: TrackType,
}

#[derive(SimpleObject)]
pub struct DeleteTrackPayload {
    track_id: i32,
}

#[derive(Default)]
pub struct TrackMutation;

#[Object]
impl TrackMutation {
    /// Post a track as the current user. Submitting identical fields again
    /// returns the existing track.
    async fn create_track(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: String,
        url: String,
    ) -> Result<CreateTrackPayload> {
        let input = TrackInput {
            title,
            description,
            url,
        };
        let track = track_service::create_track(state(ctx)?.track_repo.as_ref(), viewer(ctx), input)
            .await
            .map_err(into_graphql_error)?;
        Ok(CreateTrackPayload {
            track: TrackType(track),
        })
    }

    /// Overwrite every field of a track you own
    async fn update_track(
        &self,
        ctx: &Context<'_>,
        track_id: i32,
        title: String,
        description: String,
        url: String,
    ) -> Result<UpdateTrackPayload> {
        let input = TrackInput {
            title,
            description,
            url,
        };
        let track = track_service::update_track(
            state(ctx)?.track_repo.as_ref(),
            viewer(ctx),
            track_id,
            input,
        )
        .await
        .map_err(into_graphql_error)?;
        Ok(UpdateTrackPayload {
            track: TrackType(track),
        })
    }

    async fn delete_track(&self, ctx: &Context<'_>, track_id: i32) -> Result<DeleteTrackPayload> {
        let track_id =
            track_service::delete_track(state(ctx)?.track_repo.as_ref(), viewer(ctx), track_id)
                .await
                .map_err(into_graphql_error)?;
        Ok(DeleteTrackPayload { track_id })
    }
}
