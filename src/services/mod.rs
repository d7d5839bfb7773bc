pub mod like_service;
pub mod track_service;
pub mod user_service;
