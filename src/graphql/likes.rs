use async_graphql::{Context, Object, Result, SimpleObject};

use super::{LikeType, TrackType, UserType, into_graphql_error, state, viewer};
use crate::services::{like_service, track_service, user_service};

#[derive(Default)]
pub struct LikeQuery;

#[Object]
impl LikeQuery {
    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<LikeType>> {
        let likes = like_service::list_likes(state(ctx)?.like_repo.as_ref())
            .await
            .map_err(into_graphql_error)?;
        Ok(likes.into_iter().map(LikeType).collect())
    }
}

#[derive(SimpleObject)]
pub struct CreateLikePayload {
    like: LikeType,
    user: UserType,
    track: TrackType,
}

#[derive(Default)]
pub struct LikeMutation;

#[Object]
impl LikeMutation {
    /// Like a track as the current user. Liking twice is a no-op.
    async fn create_like(&self, ctx: &Context<'_>, track_id: i32) -> Result<CreateLikePayload> {
        let state = state(ctx)?;
        let viewer = viewer(ctx);

        let like = like_service::create_like(
            state.like_repo.as_ref(),
            state.track_repo.as_ref(),
            viewer,
            track_id,
        )
        .await
        .map_err(into_graphql_error)?;

        let user = user_service::me(viewer).map_err(into_graphql_error)?;
        let track = track_service::get_track(state.track_repo.as_ref(), like.track_id)
            .await
            .map_err(into_graphql_error)?;

        Ok(CreateLikePayload {
            like: LikeType(like),
            user: UserType(user),
            track: TrackType(track),
        })
    }
}
