//! # Member Infrastructure
//! 
//! Database and media host implementations (adapters).

pub mod database;
pub mod media;

pub use database::{create_pool, run_migrations, PgUserRepository};
pub use media::CloudinaryPhotoService;
