use std::sync::Arc;

use member_core::services::MemberService;
use sqlx::PgPool;

use crate::identity::CallerIdentity;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub member_service: Arc<MemberService>,
    pub identity: Arc<dyn CallerIdentity>,
    /// Pool checked by the readiness probe, when one is configured.
    pub db: Option<PgPool>,
}
