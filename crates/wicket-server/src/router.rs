//! Router configuration.

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::ui;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::home))
        .route("/login", get(ui::login_page).post(ui::login_submit))
        .route("/register", get(ui::register_page).post(ui::register_submit))
        .route("/secrets", get(ui::secrets_page))
        .with_state(state)
        .nest_service("/public", ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}
