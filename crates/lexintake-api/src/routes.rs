//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, a request body limit,
//! and all endpoint handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
///
/// # Arguments
/// * `state` - The shared application state.
///
/// # Returns
/// A fully configured axum Router ready to serve requests.
pub fn create_router(state: AppState) -> Router {
    // CORS middleware: allow localhost origins for the web widget.
    // Use the configured port plus port+1 for a dev server.
    let port = state.config.general.port;
    let dev_port = port.saturating_add(1);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            format!("http://127.0.0.1:{}", port)
                .parse::<HeaderValue>()
                .expect("valid origin"),
            format!("http://localhost:{}", port)
                .parse::<HeaderValue>()
                .expect("valid origin"),
            format!("http://127.0.0.1:{}", dev_port)
                .parse::<HeaderValue>()
                .expect("valid origin"),
            format!("http://localhost:{}", dev_port)
                .parse::<HeaderValue>()
                .expect("valid origin"),
        ]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .route("/api/narrate", post(handlers::narrate))
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64KB is plenty for chat
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Binds to 127.0.0.1 (localhost only) on the port from config.
pub async fn start_server(
    state: AppState,
) -> Result<(), lexintake_core::error::IntakeError> {
    let port = state.config.general.port;
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| lexintake_core::error::IntakeError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| lexintake_core::error::IntakeError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
