use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::identity::resolve_caller_identity;
use crate::state::AppState;

/// Reject requests without a resolvable caller; otherwise expose the caller
/// to handlers as an `Extension<CurrentUser>`.
pub async fn require_caller(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = resolve_caller_identity(state.identity.as_ref(), request.headers())?;
    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
