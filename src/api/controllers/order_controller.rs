use crate::api::request::PlaceOrderRequest;
use crate::services::order_service::OrderService;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn place_order(Json(request): Json<PlaceOrderRequest>) -> impl IntoResponse {
    match OrderService::new().place_order(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
