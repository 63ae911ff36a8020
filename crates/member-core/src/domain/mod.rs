//! # Member Core - Domain Module
//! 
//! Domain entities and read projections for member profiles.

pub mod app_user;
pub mod photo;
pub mod photo_album;
pub mod member;
pub mod profile_update;

// Re-export all entities
pub use app_user::AppUser;
pub use photo::Photo;
pub use photo_album::{PhotoAlbum, PhotoError};
pub use member::{calculate_age, Member, PhotoDto};
pub use profile_update::ProfileUpdate;
