// src/api/http/photos.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use super::cage_or_404;
use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::media::{PHOTO_CONTENT_TYPE, cage_photo_keys, dog_photo_keys};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub original_url: String,
    pub thumbnail_url: String,
}

async fn image_field(multipart: &mut Multipart) -> ApiResult<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            return field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read image field: {e}")));
        }
    }
    Err(ApiError::bad_request("image file is required"))
}

async fn store_renditions(
    state: &AppState,
    original_key: &str,
    thumbnail_key: &str,
    image: Bytes,
) -> ApiResult<UploadResponse> {
    let prepared = state
        .pipeline
        .prepare(image)
        .into_api_error("Failed to prepare photo")?;

    state
        .photos
        .put(original_key, prepared.original, PHOTO_CONTENT_TYPE)
        .await
        .into_api_error("Failed to upload photo")?;
    state
        .photos
        .put(thumbnail_key, prepared.thumbnail, PHOTO_CONTENT_TYPE)
        .await
        .into_api_error("Failed to upload thumbnail")?;

    Ok(UploadResponse {
        success: true,
        original_url: state.photos.public_url(original_key),
        thumbnail_url: state.photos.public_url(thumbnail_key),
    })
}

/// POST /cage/{id}/upload
pub async fn upload_cage_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u16>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let cage = cage_or_404(id)?;
    let image = image_field(&mut multipart).await?;

    let (original_key, thumbnail_key) = cage_photo_keys(cage);
    let response = store_renditions(&state, &original_key, &thumbnail_key, image).await?;

    info!(%cage, "uploaded cage photo");
    Ok(Json(response))
}

/// POST /cage/{id}/dogs/{dog_id}/photo
pub async fn upload_dog_photo(
    State(state): State<Arc<AppState>>,
    Path((id, dog_id)): Path<(u16, String)>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let cage = cage_or_404(id)?;
    let image = image_field(&mut multipart).await?;

    let (original_key, thumbnail_key) = dog_photo_keys(cage, &dog_id);
    let response = store_renditions(&state, &original_key, &thumbnail_key, image).await?;

    info!(%cage, %dog_id, "uploaded dog photo");
    Ok(Json(response))
}
