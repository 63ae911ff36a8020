//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MEDIA_TIMEOUT_SECONDS,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub media: MediaSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub max_upload_bytes: usize,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64,
}

/// Cloudinary-compatible media host credentials
#[derive(Debug, Deserialize, Clone)]
pub struct MediaSettings {
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub signature_algorithm: SignatureAlgorithm,
}

/// Digest used to sign media host requests. Must match the account setting.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 5000)?
            .set_default("app.name", "member-server")?
            .set_default("app.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("media.base_url", "https://api.cloudinary.com")?
            .set_default("media.timeout_seconds", DEFAULT_MEDIA_TIMEOUT_SECONDS)?
            .set_default("media.signature_algorithm", "sha1")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        info!(
            "Configuration loaded (env: {}, media signature: {:?})",
            config.app.env, config.media.signature_algorithm
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret must not be empty".into()));
        }
        if self.media.cloud_name.trim().is_empty() {
            return Err(AppError::InvalidConfig("media.cloud_name must not be empty".into()));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}
