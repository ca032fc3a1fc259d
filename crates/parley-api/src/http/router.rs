//! Axum router configuration with middleware.
//!
//! Routes sit at the top level (no versioned prefix) so the existing front
//! end keeps working unchanged. Middleware: CORS, tracing. Stored PDFs are
//! served verbatim from the upload directory under `/uploads/`.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(state.upload_service.upload_dir());

    Router::new()
        .route("/", get(handlers::index::index))
        // Session lifecycle
        .route("/new_chat", post(handlers::session::new_chat))
        .route("/switch_chat", post(handlers::session::switch_chat))
        .route("/delete_chat", post(handlers::session::delete_chat))
        .route("/get_sessions", get(handlers::session::get_sessions))
        // Message exchange
        .route("/get_response", post(handlers::message::get_response))
        .route("/clear", post(handlers::message::clear))
        .route("/get_history", get(handlers::message::get_history))
        // PDF uploads
        .route("/upload_pdf", post(handlers::upload::upload_pdf))
        .route("/remove_pdf", post(handlers::upload::remove_pdf))
        .nest_service("/uploads", uploads)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
