use crate::api::request::{ProductQuery, SearchQuery};
use crate::api::state::AppState;
use crate::services::storefront_service::StorefrontService;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;

/// Cache key of a public page: its path below the API prefix plus the
/// query string.
fn page_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

pub async fn home(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.page(&page_key(&uri), service.home()).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.page(&page_key(&uri), service.products(&query)).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn category_page(
    State(state): State<AppState>,
    uri: Uri,
    Path(slug): Path<String>,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service
        .page(&page_key(&uri), service.category_page(&slug, &query))
        .await
    {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn product_detail(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.page(&page_key(&uri), service.product_detail(&id)).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Search results change with every keystroke, so they skip the cache.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.search(&query.q).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_reviews(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.page(&page_key(&uri), service.reviews()).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn review_detail(
    State(state): State<AppState>,
    uri: Uri,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.page(&page_key(&uri), service.review_detail(&id)).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    match StorefrontService::new(&state).categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_brands(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let service = StorefrontService::new(&state);

    match service.page(&page_key(&uri), service.brands()).await {
        Ok(page) => page.into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_key_keeps_the_query() {
        let uri: Uri = "/products?sort=price-low".parse().unwrap();
        assert_eq!(page_key(&uri), "/products?sort=price-low");

        let uri: Uri = "/home".parse().unwrap();
        assert_eq!(page_key(&uri), "/home");
    }
}
