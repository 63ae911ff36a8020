// ============================================================================
// Member Core - Member Service
// File: crates/member-core/src/services/member_service.rs
// ============================================================================
//! Profile and photo operations for the calling member

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{AppUser, Member, Photo, PhotoDto, ProfileUpdate};
use crate::error::DomainError;
use crate::media::{PhotoService, PhotoUpload};
use crate::repositories::UserRepository;

const UPDATE_FAILED: &str = "Failed to update the user.";
const ADD_PHOTO_FAILED: &str = "Problem adding photo.";
const SET_MAIN_FAILED: &str = "Failed to set main photo!";
const DELETE_PHOTO_FAILED: &str = "Failed to delete the photo.";

/// Orchestrates the member repository and the media host
pub struct MemberService {
    user_repo: Arc<dyn UserRepository>,
    photo_service: Arc<dyn PhotoService>,
}

/// A freshly stored photo and the member that owns it.
#[derive(Debug, Clone)]
pub struct PhotoAdded {
    pub username: String,
    pub photo: PhotoDto,
}

impl MemberService {
    pub fn new(user_repo: Arc<dyn UserRepository>, photo_service: Arc<dyn PhotoService>) -> Self {
        Self {
            user_repo,
            photo_service,
        }
    }

    pub async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        self.user_repo.list_members().await
    }

    pub async fn get_member(&self, username: &str) -> Result<Member, DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::ValidationError("Username is required".into()));
        }

        self.user_repo
            .get_member(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))
    }

    pub async fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<(), DomainError> {
        update.validate()?;

        let mut user = self.load_user(username).await?;
        user.apply_update(update);

        self.save(&mut user, UPDATE_FAILED).await?;
        info!("Profile updated for: {}", username);
        Ok(())
    }

    /// Upload a photo to the media host and attach it to the caller.
    ///
    /// Nothing is persisted when the upload fails.
    pub async fn add_photo(
        &self,
        username: &str,
        upload: PhotoUpload,
    ) -> Result<PhotoAdded, DomainError> {
        let mut user = self.load_user(username).await?;

        let uploaded = self.photo_service.add_photo(upload).await.map_err(|e| {
            warn!("Photo upload rejected for {}: {}", username, e);
            DomainError::from(e)
        })?;

        user.photos
            .add(Photo::new(uploaded.url, Some(uploaded.public_id)));

        self.save(&mut user, ADD_PHOTO_FAILED).await?;

        let photo = user
            .photos
            .last()
            .map(PhotoDto::from)
            .ok_or_else(|| DomainError::SaveFailed(ADD_PHOTO_FAILED.into()))?;

        info!("Photo {} added for: {}", photo.id, user.user_name);
        Ok(PhotoAdded {
            username: user.user_name,
            photo,
        })
    }

    pub async fn set_main_photo(&self, username: &str, photo_id: i32) -> Result<(), DomainError> {
        let mut user = self.load_user(username).await?;

        user.photos.set_main(photo_id).map_err(|e| {
            warn!("Set main photo {} rejected for {}: {}", photo_id, username, e);
            DomainError::from(e)
        })?;

        self.save(&mut user, SET_MAIN_FAILED).await?;
        info!("Main photo of {} is now {}", username, photo_id);
        Ok(())
    }

    /// Delete a non-main photo, remotely first and then locally.
    ///
    /// The photo stays in the album when the media host refuses the delete.
    pub async fn delete_photo(&self, username: &str, photo_id: i32) -> Result<(), DomainError> {
        let mut user = self.load_user(username).await?;

        let public_id = user
            .photos
            .removable(photo_id)
            .map_err(|e| {
                warn!("Delete photo {} rejected for {}: {}", photo_id, username, e);
                DomainError::from(e)
            })?
            .public_id
            .clone();

        if let Some(public_id) = public_id {
            self.photo_service
                .delete_photo(&public_id)
                .await
                .map_err(|e| {
                    warn!("Media host refused to delete {}: {}", public_id, e);
                    DomainError::from(e)
                })?;
        }

        user.photos.remove(photo_id)?;

        self.save(&mut user, DELETE_PHOTO_FAILED).await?;
        info!("Photo {} deleted for: {}", photo_id, username);
        Ok(())
    }

    async fn load_user(&self, username: &str) -> Result<AppUser, DomainError> {
        self.user_repo
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!("No user record for caller: {}", username);
                DomainError::UserNotFound(username.to_string())
            })
    }

    async fn save(&self, user: &mut AppUser, failure: &str) -> Result<(), DomainError> {
        if self.user_repo.save_user(user).await? {
            return Ok(());
        }
        warn!("Save wrote no changes for {}: {}", user.user_name, failure);
        Err(DomainError::SaveFailed(failure.to_string()))
    }
}
