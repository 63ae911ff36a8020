//! Domain services (business logic)

pub mod member_service;

pub use member_service::{MemberService, PhotoAdded};
