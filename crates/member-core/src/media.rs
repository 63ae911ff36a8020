//! Media hosting port

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The host refused the request; the message is the host's own.
    #[error("{0}")]
    Rejected(String),

    #[error("Media service unavailable: {0}")]
    Transport(String),

    #[error("Unexpected media service response: {0}")]
    InvalidResponse(String),
}

/// A photo file received from a client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Where the host stored an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadResult {
    pub url: String,
    pub public_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoService: Send + Sync {
    async fn add_photo(&self, upload: PhotoUpload) -> Result<ImageUploadResult, MediaError>;
    async fn delete_photo(&self, public_id: &str) -> Result<(), MediaError>;
}
