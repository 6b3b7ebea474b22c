use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    controller::{bungie::callback, health::health},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/bungie/callback", get(callback))
        .layer(TraceLayer::new_for_http())
}
