// ============================================================================
// Member API - User Handlers
// File: crates/member-api/src/handlers/users.rs
// ============================================================================
//! Member listing, profile update, and photo management handlers

use axum::{
    extract::{Extension, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use member_core::domain::{Member, ProfileUpdate};
use member_core::media::PhotoUpload;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::identity::CurrentUser;
use crate::state::AppState;

/// Characters escaped in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn member_location(username: &str) -> String {
    format!("/api/users/{}", utf8_percent_encode(username, PATH_SEGMENT))
}

/// List members - GET /users
pub async fn list_members(State(state): State<AppState>) -> Result<Json<Vec<Member>>, ApiError> {
    let members = state.member_service.list_members().await?;
    debug!("Returning {} members", members.len());
    Ok(Json(members))
}

/// Get member - GET /users/{username}
pub async fn get_member(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Member>, ApiError> {
    Ok(Json(state.member_service.get_member(&username).await?))
}

/// Update own profile - PUT /users
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<StatusCode, ApiError> {
    state
        .member_service
        .update_profile(caller.username(), &payload)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload a photo - POST /users/add-photo
///
/// Expects a multipart form with a single `file` field.
pub async fn add_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = read_photo_upload(multipart).await?;
    info!(
        "Photo upload from {}: {} ({} bytes)",
        caller.username(),
        upload.file_name,
        upload.data.len()
    );

    let added = state
        .member_service
        .add_photo(caller.username(), upload)
        .await?;

    let location = member_location(&added.username);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(added.photo),
    ))
}

/// Set main photo - PUT /users/set-main-photo/{photo_id}
pub async fn set_main_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .member_service
        .set_main_photo(caller.username(), photo_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete photo - DELETE /users/delete-photo/{photo_id}
pub async fn delete_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .member_service
        .delete_photo(caller.username(), photo_id)
        .await?;
    Ok(StatusCode::OK)
}

async fn read_photo_upload(mut multipart: Multipart) -> Result<PhotoUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("photo").to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
            .to_vec();

        if data.is_empty() {
            return Err(ApiError::BadRequest("file is empty".to_string()));
        }

        return Ok(PhotoUpload {
            file_name,
            content_type,
            data,
        });
    }

    Err(ApiError::BadRequest("file required".to_string()))
}
