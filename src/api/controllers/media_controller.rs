use crate::api::form::FormPayload;
use crate::api::state::AppState;
use crate::security::jwt::AdminClaims;
use crate::services::media_service::MediaService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_images(_: AdminClaims, State(state): State<AppState>) -> impl IntoResponse {
    match MediaService::new(&state).list_images().await {
        Ok(images) => (StatusCode::OK, Json(images)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Expects the image under the `image` field.
pub async fn upload_image(
    _: AdminClaims,
    State(state): State<AppState>,
    payload: FormPayload,
) -> impl IntoResponse {
    match MediaService::new(&state)
        .upload_image(payload.file_named("image"))
        .await
    {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_image(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match MediaService::new(&state).delete_image(&name).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
