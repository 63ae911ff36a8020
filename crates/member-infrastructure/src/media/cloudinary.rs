// ============================================================================
// Member Infrastructure - Cloudinary Photo Service
// File: crates/member-infrastructure/src/media/cloudinary.rs
// ============================================================================
//! Signed upload and destroy calls against a Cloudinary-compatible image API

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use member_core::media::{ImageUploadResult, MediaError, PhotoService, PhotoUpload};
use member_shared::config::{MediaSettings, SignatureAlgorithm};
use member_shared::constants::PHOTO_TRANSFORMATION;

pub struct CloudinaryPhotoService {
    client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    signature_algorithm: SignatureAlgorithm,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<ErrorBody>,
}

/// Request signature: params sorted by name, joined as `k=v` with `&`,
/// secret appended, hex digest with the account's algorithm.
pub fn sign_params(
    params: &[(&str, String)],
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&to_sign, api_secret),
        SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&to_sign, api_secret),
    }
}

fn hex_digest<D: Digest>(payload: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(payload.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl CloudinaryPhotoService {
    pub fn new(settings: &MediaSettings) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            cloud_name: settings.cloud_name.clone(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            signature_algorithm: settings.signature_algorithm,
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1_1/{}/image/{}", self.base_url, self.cloud_name, action)
    }

    /// Form carrying `params`, the api key and the signature.
    fn signed_form(&self, params: Vec<(&'static str, String)>) -> Form {
        let signature = sign_params(&params, &self.api_secret, self.signature_algorithm);
        params
            .into_iter()
            .fold(Form::new(), |form, (k, v)| form.text(k, v))
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
    }

    async fn post<T: DeserializeOwned>(&self, action: &str, form: Form) -> Result<T, MediaError> {
        let response = self
            .client
            .post(self.endpoint(action))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Media host {} request failed: {}", action, e);
                MediaError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!("Media host {} answered {}", action, status);

        response.json::<T>().await.map_err(|e| {
            error!("Media host {} returned unreadable body ({}): {}", action, status, e);
            MediaError::InvalidResponse(format!("{}: {}", status, e))
        })
    }
}

#[async_trait]
impl PhotoService for CloudinaryPhotoService {
    async fn add_photo(&self, upload: PhotoUpload) -> Result<ImageUploadResult, MediaError> {
        if upload.data.is_empty() {
            return Err(MediaError::Rejected("Empty file".to_string()));
        }

        info!("Uploading photo {} ({} bytes)", upload.file_name, upload.data.len());

        let mut file = Part::bytes(upload.data).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            file = file
                .mime_str(content_type)
                .map_err(|e| MediaError::Rejected(format!("Invalid content type: {}", e)))?;
        }

        let form = self
            .signed_form(vec![
                ("timestamp", Utc::now().timestamp().to_string()),
                ("transformation", PHOTO_TRANSFORMATION.to_string()),
            ])
            .part("file", file);

        let body: UploadResponse = self.post("upload", form).await?;
        if let Some(err) = body.error {
            warn!("Media host rejected upload: {}", err.message);
            return Err(MediaError::Rejected(err.message));
        }

        match (body.secure_url, body.public_id) {
            (Some(url), Some(public_id)) => Ok(ImageUploadResult { url, public_id }),
            _ => Err(MediaError::InvalidResponse(
                "upload response missing secure_url or public_id".to_string(),
            )),
        }
    }

    async fn delete_photo(&self, public_id: &str) -> Result<(), MediaError> {
        info!("Deleting hosted photo {}", public_id);

        let form = self.signed_form(vec![
            ("public_id", public_id.to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
        ]);

        let body: DestroyResponse = self.post("destroy", form).await?;
        if let Some(err) = body.error {
            warn!("Media host rejected delete of {}: {}", public_id, err.message);
            return Err(MediaError::Rejected(err.message));
        }

        match body.result.as_deref() {
            Some("ok") => Ok(()),
            // already gone on the host
            Some("not found") => {
                warn!("Hosted photo {} was already absent", public_id);
                Ok(())
            }
            Some(other) => Err(MediaError::Rejected(other.to_string())),
            None => Err(MediaError::InvalidResponse(
                "destroy response missing result".to_string(),
            )),
        }
    }
}
