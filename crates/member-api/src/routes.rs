use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, users};
use crate::middleware::require_caller;
use crate::state::AppState;

/// Member routes. Every route requires an authenticated caller.
pub fn users_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_members).put(users::update_profile))
        .route("/users/{username}", get(users::get_member))
        .route("/users/add-photo", post(users::add_photo))
        .route("/users/set-main-photo/{photo_id}", put(users::set_main_photo))
        .route("/users/delete-photo/{photo_id}", delete(users::delete_photo))
        .route_layer(middleware::from_fn_with_state(state, require_caller))
}

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    Router::new()
        .merge(public_routes)
        .nest("/api", users_routes(state.clone()))
        .with_state(state)
        // Body limit (photo uploads)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
