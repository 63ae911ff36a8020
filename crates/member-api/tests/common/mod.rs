//! In-memory ports and request helpers for router tests

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use chrono::{NaiveDate, Utc};
use member_api::identity::JwtBearerIdentity;
use member_api::{build_router, AppState};
use member_core::domain::{AppUser, Member, Photo, PhotoAlbum};
use member_core::error::DomainError;
use member_core::media::{ImageUploadResult, MediaError, PhotoService, PhotoUpload};
use member_core::repositories::UserRepository;
use member_core::services::MemberService;
use member_security::JwtService;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const SECRET: &str = "router test signing secret";
pub const BOUNDARY: &str = "member-test-boundary";

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<String, AppUser>>,
    next_photo_id: Mutex<i32>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<AppUser>) -> Self {
        let next = users
            .iter()
            .flat_map(|u| u.photos.iter().map(|p| p.id))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.user_name.clone(), u)).collect()),
            next_photo_id: Mutex::new(next),
        }
    }

    pub fn user(&self, username: &str) -> Option<AppUser> {
        self.users.lock().unwrap().get(username).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        let users = self.users.lock().unwrap();
        let mut members: Vec<Member> = users.values().map(Member::from).collect();
        members.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(members)
    }

    async fn get_member(&self, username: &str) -> Result<Option<Member>, DomainError> {
        Ok(self.user(username).as_ref().map(Member::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        Ok(self.user(username))
    }

    async fn save_user(&self, user: &mut AppUser) -> Result<bool, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.get(&user.user_name) == Some(&*user) {
            return Ok(false);
        }

        let pending: Vec<usize> = user
            .photos
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_persisted())
            .map(|(i, _)| i)
            .collect();
        let mut next = self.next_photo_id.lock().unwrap();
        for index in pending {
            user.photos.assign_id(index, *next);
            *next += 1;
        }

        users.insert(user.user_name.clone(), user.clone());
        Ok(true)
    }
}

#[derive(Default)]
pub struct FakeMediaHost {
    pub upload_error: Option<String>,
    pub delete_error: Option<String>,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl PhotoService for FakeMediaHost {
    async fn add_photo(&self, upload: PhotoUpload) -> Result<ImageUploadResult, MediaError> {
        if let Some(message) = &self.upload_error {
            return Err(MediaError::Rejected(message.clone()));
        }
        Ok(ImageUploadResult {
            url: format!("https://res.example/members/{}", upload.file_name),
            public_id: format!("members/{}", upload.file_name),
        })
    }

    async fn delete_photo(&self, public_id: &str) -> Result<(), MediaError> {
        if let Some(message) = &self.delete_error {
            return Err(MediaError::Rejected(message.clone()));
        }
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub fn photo(id: i32, is_main: bool) -> Photo {
    Photo {
        id,
        url: format!("https://res.example/members/{}.jpg", id),
        is_main,
        public_id: Some(format!("members/{}", id)),
    }
}

pub fn user(name: &str, photos: Vec<Photo>) -> AppUser {
    AppUser {
        id: name.len() as i32,
        user_name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1994, 7, 21).unwrap(),
        known_as: Some(name.to_uppercase()),
        created: Utc::now(),
        last_active: Utc::now(),
        gender: None,
        introduction: None,
        looking_for: None,
        interests: None,
        city: Some("York".into()),
        country: Some("UK".into()),
        photos: PhotoAlbum::from_photos(photos),
    }
}

pub fn app(users: Arc<InMemoryUsers>, media: Arc<FakeMediaHost>) -> Router {
    let state = AppState {
        member_service: Arc::new(MemberService::new(users, media)),
        identity: Arc::new(JwtBearerIdentity::new(JwtService::new(SECRET, 3600))),
        db: None,
    };
    build_router(state, 1024 * 1024)
}

pub fn bearer(username: &str) -> String {
    let token = JwtService::new(SECRET, 3600)
        .generate_access_token(username)
        .unwrap();
    format!("Bearer {}", token)
}

pub fn authed(method: &str, uri: &str, username: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(username))
}

pub fn multipart_file(file_name: &str, data: &[u8]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
