use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::shared::state::SharedState;

/// Multipart overhead allowed on top of the file size limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Configure all application routes
pub fn configure_routes(state: SharedState) -> Router {
    let upload_limit =
        (state.config.uploads.max_file_size_mb * 1024.0 * 1024.0) as usize * 2 + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/chat/stream", post(handlers::chat::stream))
        .route("/api/parse", post(handlers::parse::parse))
        .route(
            "/api/uploads",
            post(handlers::upload::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .nest_service("/uploads", ServeDir::new(&state.uploads_dir))
        .fallback_service(ServeDir::new("dist"))
        .with_state(state)
}
