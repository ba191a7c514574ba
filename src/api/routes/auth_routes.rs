use crate::api::controllers::auth_controller::login;
use crate::api::state::AppState;
use axum::routing::post;
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
