use crate::api::state::AppState;
use crate::data::content::{SiteContent, SiteSettings};
use crate::security::jwt::AdminClaims;
use crate::services::content_service::ContentService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_content(State(state): State<AppState>) -> impl IntoResponse {
    Json(ContentService::new(&state).get_content().await)
}

pub async fn update_content(
    _: AdminClaims,
    State(state): State<AppState>,
    Json(content): Json<SiteContent>,
) -> impl IntoResponse {
    match ContentService::new(&state).update_content(content).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_site_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(ContentService::new(&state).get_site_settings().await)
}

pub async fn save_site_settings(
    _: AdminClaims,
    State(state): State<AppState>,
    Json(settings): Json<SiteSettings>,
) -> impl IntoResponse {
    match ContentService::new(&state).save_site_settings(settings).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
