//! # Member Security
//! 
//! Bearer token handling: claims, issuing, validation.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService};
