pub mod like;
pub mod track;
pub mod user;

pub use like::Like;
pub use track::Track;
pub use user::User;
