use crate::api::request::CategoryRequest;
use crate::api::state::AppState;
use crate::security::jwt::AdminClaims;
use crate::services::category_service::CategoryService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_categories(_: AdminClaims, State(state): State<AppState>) -> impl IntoResponse {
    match CategoryService::new(&state).categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_category(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match CategoryService::new(&state).category(&id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Inserts or updates, depending on whether the body carries an id
pub async fn save_category(
    _: AdminClaims,
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> impl IntoResponse {
    match CategoryService::new(&state).save_category(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_category(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match CategoryService::new(&state).delete_category(&id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
