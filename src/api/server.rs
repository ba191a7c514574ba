use crate::api::config::Config;
use crate::api::routes::{admin_routes, auth_routes, storefront_routes};
use crate::api::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

/// The full application: JSON API under `/api/v1`, uploaded objects under
/// the uploads path and media library images under `/images`.
pub fn app(state: AppState) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.body_limit_bytes();
    let uploads_path = state.config.uploads_public_path.clone();
    let uploads = ServeDir::new(&state.config.uploads_dir);
    let images = ServeDir::new(&state.config.media_dir);

    let api = Router::new()
        .merge(storefront_routes::routes())
        .merge(auth_routes::routes())
        .nest("/admin", admin_routes::routes());

    Router::new()
        .route("/api", get(|| async { "Demporium API is running!" }))
        .nest(API_PREFIX, api)
        .nest_service(&uploads_path, uploads)
        .nest_service("/images", images)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

pub async fn start(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = config.bind_addr.clone();
    let state = AppState::from_config(config)?;

    tracing::info!(
        "Catalog backend: {}",
        if state.catalog.is_remote() {
            "postgres"
        } else {
            "local fixtures"
        }
    );

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
