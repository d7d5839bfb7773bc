//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only trait definitions, the requester and domain error types.

pub mod errors;
pub mod repositories;
pub mod viewer;

pub use errors::DomainError;
pub use repositories::*;
pub use viewer::Viewer;
