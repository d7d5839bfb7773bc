pub mod graphql;
pub mod health;

use axum::{Extension, Router, routing::get};

use crate::graphql::build_schema;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // GraphQL (GET serves GraphiQL, POST executes)
        .route(
            "/graphql",
            get(graphql::graphiql).post(graphql::graphql_handler),
        )
        .route(
            "/graphql/",
            get(graphql::graphiql).post(graphql::graphql_handler),
        )
        .route("/graphql/sdl", get(graphql::sdl))
        .layer(Extension(schema))
        .with_state(state)
}
