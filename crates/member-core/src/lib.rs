//! # Member Core
//! 
//! Domain entities, services, and port traits for member profiles.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod media;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
