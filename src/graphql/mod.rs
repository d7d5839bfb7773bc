//! GraphQL schema: object types, queries and mutations
//!
//! Resolvers stay thin. They pull the [`AppState`] and the [`Viewer`] out of
//! the request context and hand off to `crate::services`.

pub mod likes;
pub mod tracks;
pub mod types;
pub mod users;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, MergedObject, Schema};

use crate::domain::{DomainError, Viewer};
use crate::infrastructure::AppState;

pub use types::{LikeType, TrackType, UserType};

#[derive(MergedObject, Default)]
pub struct QueryRoot(tracks::TrackQuery, likes::LikeQuery, users::UserQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    tracks::TrackMutation,
    likes::LikeMutation,
    users::UserMutation,
);

pub type TracksSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> TracksSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

static ANONYMOUS: Viewer = Viewer::Anonymous;

pub(crate) fn state<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// Requests executed without a viewer attached are anonymous
pub(crate) fn viewer<'a>(ctx: &'a Context<'_>) -> &'a Viewer {
    ctx.data_opt::<Viewer>().unwrap_or(&ANONYMOUS)
}

/// Map a domain failure to a GraphQL error with an `extensions.code`.
/// Storage details are logged, not returned.
pub(crate) fn into_graphql_error(err: DomainError) -> async_graphql::Error {
    let message = match &err {
        DomainError::Database(_) | DomainError::Internal(_) => {
            tracing::error!("Resolver failed: {}", err);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };
    let code = err.code();
    async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", code))
}
