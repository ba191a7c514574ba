use crate::api::form::FormPayload;
use crate::api::request::BrandForm;
use crate::api::state::AppState;
use crate::security::jwt::AdminClaims;
use crate::services::brand_service::BrandService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_brands(_: AdminClaims, State(state): State<AppState>) -> impl IntoResponse {
    match BrandService::new(&state).brands().await {
        Ok(brands) => (StatusCode::OK, Json(brands)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_brand(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match BrandService::new(&state).brand(&id).await {
        Ok(brand) => (StatusCode::OK, Json(brand)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn save_brand(
    _: AdminClaims,
    State(state): State<AppState>,
    payload: FormPayload,
) -> impl IntoResponse {
    let form = match BrandForm::from_payload(&payload) {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match BrandService::new(&state).save_brand(form).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_brand(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match BrandService::new(&state).delete_brand(&id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
