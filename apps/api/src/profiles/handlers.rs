use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user_info::UserInfoRow;
use crate::profiles::extraction::extract_pdf_text;
use crate::profiles::models::{CreateUserInfoRequest, NewUserInfo, UpdateFieldRequest};
use crate::profiles::store::{self, ProfileField};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// One file pulled out of a multipart body.
struct Upload {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation("Missing 'file' field".to_string()))
}

fn is_pdf(upload: &Upload) -> bool {
    upload.content_type.as_deref() == Some("application/pdf")
        || upload.file_name.to_lowercase().ends_with(".pdf")
}

async fn require_user_name(state: &AppState, user_id: Uuid) -> Result<String, AppError> {
    let user = store::get_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(user.display_name())
}

async fn update_field(
    state: &AppState,
    req: UpdateFieldRequest,
    field: ProfileField,
) -> Result<Json<UserInfoRow>, AppError> {
    let row = store::update_field(&state.db, req.user_id, field, &req.value)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", req.user_id)))?;
    Ok(Json(row))
}

/// POST /api/v1/userinfo
pub async fn handle_create_user_info(
    State(state): State<AppState>,
    Json(req): Json<CreateUserInfoRequest>,
) -> Result<(StatusCode, Json<UserInfoRow>), AppError> {
    let name = require_user_name(&state, req.user_id).await?;
    let row = store::insert_user_info(&state.db, req.user_id, &name, &req.info).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/userinfo
pub async fn handle_get_user_info(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserInfoRow>, AppError> {
    let row = store::get_user_info(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", params.user_id)))?;
    Ok(Json(row))
}

/// PUT /api/v1/userinfo/goal
pub async fn handle_update_goal(
    State(state): State<AppState>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<UserInfoRow>, AppError> {
    update_field(&state, req, ProfileField::Goal).await
}

/// PUT /api/v1/userinfo/pronouns
pub async fn handle_update_pronouns(
    State(state): State<AppState>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<UserInfoRow>, AppError> {
    update_field(&state, req, ProfileField::Pronouns).await
}

/// PUT /api/v1/userinfo/imagelink
pub async fn handle_update_image_link(
    State(state): State<AppState>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<UserInfoRow>, AppError> {
    update_field(&state, req, ProfileField::ImageLink).await
}

/// POST /api/v1/userinfo/resume
///
/// Extracts profile fields from an uploaded PDF resume and stores them.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UserInfoRow>), AppError> {
    let upload = read_upload(multipart).await?;
    if !is_pdf(&upload) {
        return Err(AppError::Validation(
            "Resume must be a PDF file".to_string(),
        ));
    }

    let name = require_user_name(&state, params.user_id).await?;

    let data = upload.data;
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&data))
        .await
        .map_err(|e| anyhow::anyhow!("PDF extraction task failed: {e}"))??;
    info!(
        "Extracted {} characters of resume text for user {}",
        text.len(),
        params.user_id
    );

    let extracted = state.extractor.extract(&text).await?;
    let info = NewUserInfo::from(extracted);
    let row = store::insert_user_info(&state.db, params.user_id, &name, &info).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/userinfo/photo
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    multipart: Multipart,
) -> Result<Json<UserInfoRow>, AppError> {
    let upload = read_upload(multipart).await?;

    let key = photo_key(params.user_id, &upload.file_name);
    let content_type = upload
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(ByteStream::from(upload.data))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Photo upload failed: {e}")))?;

    info!("Uploaded photo to s3://{}/{}", state.config.s3_bucket, key);

    let url = object_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);
    let row = store::update_field(&state.db, params.user_id, ProfileField::ImageLink, &url)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", params.user_id)))?;
    Ok(Json(row))
}

fn photo_key(user_id: Uuid, file_name: &str) -> String {
    // Keep only the last path segment of whatever the client sent.
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("photo");
    format!("photos/{user_id}/{base}")
}

fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_upload(file_name: &str, content_type: Option<&str>) -> Upload {
        Upload {
            file_name: file_name.to_string(),
            content_type: content_type.map(str::to_string),
            data: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    #[test]
    fn test_is_pdf_by_content_type_or_extension() {
        assert!(is_pdf(&make_upload("resume.bin", Some("application/pdf"))));
        assert!(is_pdf(&make_upload("Resume.PDF", None)));
        assert!(!is_pdf(&make_upload("resume.docx", Some("application/msword"))));
    }

    #[test]
    fn test_photo_key_strips_client_paths() {
        let user_id = Uuid::nil();
        assert_eq!(
            photo_key(user_id, "../../etc/me.png"),
            format!("photos/{user_id}/me.png")
        );
        assert_eq!(
            photo_key(user_id, "C:\\pics\\me.jpg"),
            format!("photos/{user_id}/me.jpg")
        );
        assert_eq!(photo_key(user_id, ""), format!("photos/{user_id}/photo"));
    }

    #[test]
    fn test_object_url_joins_endpoint_bucket_and_key() {
        assert_eq!(
            object_url("http://localhost:9000/", "hackmatch", "photos/a/b.png"),
            "http://localhost:9000/hackmatch/photos/a/b.png"
        );
    }
}
