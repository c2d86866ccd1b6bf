use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use encore_core::models::{LogUploadRequest, LogUploadResponse};
use encore_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Log a completed media upload
///
/// Validates the four required fields, applies optional-field defaults
/// (`file_type` -> "unknown", `file_size` -> 0), and inserts one row with a
/// server-assigned timestamp. No write is attempted when validation fails.
#[utoipa::path(
    post,
    path = "/api/log-upload",
    tag = "uploads",
    request_body = LogUploadRequest,
    responses(
        (status = 200, description = "Upload logged", body = LogUploadResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, payload), fields(operation = "log_upload"))]
pub async fn log_upload(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogUploadRequest>, JsonRejection>,
) -> Result<Json<LogUploadResponse>, HttpAppError> {
    let Json(request) = payload.map_err(HttpAppError::from)?;

    let log = request.into_new_log().map_err(|_missing| {
        AppError::InvalidInput(
            "Missing required fields: image_url, username, user_email, cloudinary_public_id"
                .to_string(),
        )
    })?;

    let id = state.store.insert(log).await?;

    Ok(Json(LogUploadResponse {
        success: true,
        id,
        message: "Upload logged successfully".to_string(),
    }))
}

/// Fallback for non-POST methods on the log-upload route: reject with 405
/// and no side effect.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}
