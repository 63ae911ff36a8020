//! Domain errors

use thiserror::Error;

use crate::domain::PhotoError;
use crate::media::MediaError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(i32),

    #[error("This is already your main photo")]
    AlreadyMainPhoto,

    #[error("You cannot delete your main photo")]
    CannotDeleteMainPhoto,

    /// Message reported by the media host, passed through unchanged.
    #[error("{0}")]
    MediaService(String),

    /// A save that wrote nothing; carries the operation's failure message.
    #[error("{0}")]
    SaveFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<PhotoError> for DomainError {
    fn from(err: PhotoError) -> Self {
        match err {
            PhotoError::NotFound(id) => DomainError::PhotoNotFound(id),
            PhotoError::AlreadyMain => DomainError::AlreadyMainPhoto,
            PhotoError::IsMain => DomainError::CannotDeleteMainPhoto,
        }
    }
}

impl From<MediaError> for DomainError {
    fn from(err: MediaError) -> Self {
        DomainError::MediaService(err.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(err: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(err.to_string())
    }
}
