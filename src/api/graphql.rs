//! HTTP transport for the GraphQL schema

use async_graphql::http::GraphiQLSource;
use async_graphql::{BatchRequest, BatchResponse};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

use crate::domain::Viewer;
use crate::graphql::TracksSchema;

/// Execute a single or batched GraphQL request as the viewer named by the
/// `Authorization` header.
pub async fn graphql_handler(
    Extension(schema): Extension<TracksSchema>,
    viewer: Viewer,
    Json(request): Json<BatchRequest>,
) -> Json<BatchResponse> {
    if let Some(user) = viewer.user() {
        tracing::debug!("GraphQL request from {}", user.username);
    }
    Json(schema.execute_batch(request.data(viewer)).await)
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Schema in SDL form
pub async fn sdl(Extension(schema): Extension<TracksSchema>) -> String {
    schema.sdl()
}
