use crate::api::form::FormPayload;
use crate::api::request::{ReviewForm, ReviewRecordRequest, SignedUploadRequest};
use crate::api::state::AppState;
use crate::security::jwt::AdminClaims;
use crate::services::review_service::ReviewService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_all_reviews(_: AdminClaims, State(state): State<AppState>) -> impl IntoResponse {
    match ReviewService::new(&state).reviews().await {
        Ok(reviews) => (StatusCode::OK, Json(reviews)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_review_by_id(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ReviewService::new(&state).get_review(&id).await {
        Ok(review) => (StatusCode::OK, Json(review)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Fallback path: the video travels in the multipart body.
pub async fn create_review(
    _: AdminClaims,
    State(state): State<AppState>,
    payload: FormPayload,
) -> impl IntoResponse {
    let form = match ReviewForm::from_payload(&payload) {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match ReviewService::new(&state).create_review_with_video(form).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_upload_url(
    _: AdminClaims,
    State(state): State<AppState>,
    Json(request): Json<SignedUploadRequest>,
) -> impl IntoResponse {
    match ReviewService::new(&state)
        .signed_review_upload_url(&request.file_name)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_review_record(
    _: AdminClaims,
    State(state): State<AppState>,
    Json(request): Json<ReviewRecordRequest>,
) -> impl IntoResponse {
    match ReviewService::new(&state).create_review_record(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_review(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: FormPayload,
) -> impl IntoResponse {
    let form = match ReviewForm::from_payload(&payload) {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match ReviewService::new(&state).update_review(&id, form).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_review(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ReviewService::new(&state).delete_review(&id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
