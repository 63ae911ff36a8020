//! # Member Shared
//! 
//! Configuration, telemetry, and constants shared by the member crates.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
