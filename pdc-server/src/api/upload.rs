//! Temporary image upload endpoint
//!
//! Accepts a multipart form with an `image` field and relays the payload to
//! the external image host. The returned URL is not attached to any record
//! here; the client writes it into the record's images group on its next save.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// POST /api/inspections/temp/upload
pub async fn upload_image(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::BadRequest(format!("failed to read image field: {}", e)))?;

        let image_url = state
            .images
            .upload(bytes.to_vec(), &content_type, &file_name)
            .await?;

        return Ok(Json(UploadResponse { image_url }));
    }

    Err(Error::BadRequest("No file uploaded".to_string()))
}
