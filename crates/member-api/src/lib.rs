//! # Member API
//! 
//! HTTP handlers, middleware, caller identity, and routing.

pub mod handlers;
pub mod middleware;
pub mod identity;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
