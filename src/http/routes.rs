use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Rooms
        .route("/session", get(handlers::session_redirect))
        .route("/room/:name", get(handlers::get_room))
        // Archives
        .route("/archive", get(handlers::list_archives))
        .route("/archive/start", post(handlers::start_archive))
        .route("/archive/:archive_id", get(handlers::get_archive))
        .route("/archive/:archive_id/stop", post(handlers::stop_archive))
        .route("/archive/:archive_id/view", get(handlers::view_archive))
        // Live captions
        .route("/captions/start", post(handlers::start_captions))
        .route("/captions/stop", post(handlers::stop_captions))
        // Experience Composer
        .route("/render", get(handlers::list_renders))
        .route("/render/start", post(handlers::start_render))
        .route("/render/:render_id", get(handlers::get_render))
        .route("/render/:render_id/stop", post(handlers::stop_render))
        // Request logging, and browser clients on other origins
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
