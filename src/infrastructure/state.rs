//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{LikeRepository, TrackRepository, UserRepository};
use crate::infrastructure::config::JwtConfig;
use crate::infrastructure::{SeaOrmLikeRepository, SeaOrmTrackRepository, SeaOrmUserRepository};

/// Application state shared across all handlers and resolvers
#[derive(Clone)]
pub struct AppState {
    /// Database connection, for handlers that need it directly
    db: DatabaseConnection,
    /// Track repository
    pub track_repo: Arc<dyn TrackRepository>,
    /// Like repository
    pub like_repo: Arc<dyn LikeRepository>,
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Token signing settings
    pub jwt: Arc<JwtConfig>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        let track_repo = Arc::new(SeaOrmTrackRepository::new(db.clone()));
        let like_repo = Arc::new(SeaOrmLikeRepository::new(db.clone()));
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));

        Self {
            db,
            track_repo,
            like_repo,
            user_repo,
            jwt: Arc::new(jwt),
        }
    }
}

impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
