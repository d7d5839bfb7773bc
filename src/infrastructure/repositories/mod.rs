//! Repository implementations using SeaORM

pub mod like_repository;
pub mod track_repository;
pub mod user_repository;

pub use like_repository::SeaOrmLikeRepository;
pub use track_repository::SeaOrmTrackRepository;
pub use user_repository::SeaOrmUserRepository;
