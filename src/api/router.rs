use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::admin;
use super::health;
use super::keys;
use super::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Public key issuance endpoints
        .route("/generate-key", post(keys::generate_key))
        .route("/users", post(keys::create_user))
        // Admin endpoints
        .route("/admin/register", post(admin::register_admin))
        .route("/admin/login", post(admin::login_admin))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/apikeys", get(admin::list_api_keys))
        .route("/admin/users/{user_id}", delete(admin::delete_user))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
