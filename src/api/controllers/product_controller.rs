use crate::api::form::FormPayload;
use crate::api::request::ProductForm;
use crate::api::state::AppState;
use crate::security::jwt::AdminClaims;
use crate::services::product_service::ProductService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Get all products, most popular first
pub async fn get_all_products(_: AdminClaims, State(state): State<AppState>) -> impl IntoResponse {
    match ProductService::new(&state).admin_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_product_by_id(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ProductService::new(&state).get_product(&id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a product from the multipart product form
pub async fn create_product(
    claims: AdminClaims,
    State(state): State<AppState>,
    payload: FormPayload,
) -> impl IntoResponse {
    let form = match ProductForm::from_payload(&payload) {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match ProductService::new(&state).add_product(form).await {
        Ok(response) => {
            tracing::info!("{} added a product", claims.sub);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn update_product(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: FormPayload,
) -> impl IntoResponse {
    let form = match ProductForm::from_payload(&payload) {
        Ok(form) => form,
        Err(e) => return e.into_response(),
    };

    match ProductService::new(&state).update_product(&id, form).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_product(
    _: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match ProductService::new(&state).delete_product(&id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
