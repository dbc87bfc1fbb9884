use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::auth::RequireAuth;
use crate::server::AppState;
use crate::server::dto::UploadResponse;
use crate::server::response::{ApiError, ApiResponse};
use crate::uploads::{UploadError, content_type_for};

const IMAGE_FIELD: &str = "image";

struct ImageField {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

async fn parse_image_field(multipart: &mut Multipart) -> Result<ImageField, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::new(e.status(), format!("Failed to read multipart: {}", e.body_text()))
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(&file_name).to_string());
        let data = field.bytes().await.map_err(|e| {
            ApiError::new(e.status(), format!("Failed to read file: {}", e.body_text()))
        })?;

        return Ok(ImageField {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(ApiError::bad_request("No file uploaded"))
}

/// POST /upload - multipart form with an `image` field
pub async fn upload_image(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let image = parse_image_field(&mut multipart).await?;

    let stored = state
        .uploads
        .put(&image.file_name, &image.content_type, &image.data)
        .await
        .map_err(|e| match e {
            UploadError::TooLarge { .. } => ApiError::payload_too_large(e.to_string()),
            UploadError::UnsupportedType(_) | UploadError::Empty | UploadError::InvalidName => {
                ApiError::bad_request(e.to_string())
            }
            UploadError::NotFound | UploadError::Io(_) => {
                tracing::error!("Upload storage error: {e}");
                ApiError::internal("Failed to upload file").with_detail(e)
            }
        })?;

    tracing::info!("Stored upload {} ({} bytes)", stored.name, stored.size);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UploadResponse { url: stored.url })),
    ))
}

/// GET /uploads/{name}
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let (reader, size) = match state.uploads.get(&name).await {
        Ok(result) => result,
        Err(UploadError::NotFound | UploadError::InvalidName) => {
            return ApiError::not_found("File not found").into_response();
        }
        Err(e) => {
            tracing::warn!("Upload storage error: {e}");
            return ApiError::internal("Failed to read file").into_response();
        }
    };

    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&name))
        .header(header::CONTENT_LENGTH, size)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .header("X-Content-Type-Options", "nosniff")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
