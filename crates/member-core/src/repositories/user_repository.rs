//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::{AppUser, Member};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError>;
    async fn get_member(&self, username: &str) -> Result<Option<Member>, DomainError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError>;

    /// Persist `user` and its photos. Newly added photos get their ids
    /// assigned in place. Returns whether anything was written.
    async fn save_user(&self, user: &mut AppUser) -> Result<bool, DomainError>;
}
