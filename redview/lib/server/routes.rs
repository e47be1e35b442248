//! Route definitions for the HTTP server.
//!
//! This module sets up the routing for the REST API endpoints and the media file route.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response, routing::get, Router};
use tower_http::cors::CorsLayer;

use super::{files, handlers, state::ServerState};

//-------------------------------------------------------------------------------------------------
// Functions
//-------------------------------------------------------------------------------------------------

/// Creates a new router with all API endpoints configured
///
/// Cross-origin requests are allowed from anywhere so the viewer can be served from another port.
///
/// ## Arguments
/// * `state` - The shared server state
///
/// # Returns
/// A configured Router instance
pub fn create_router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/{rover}/latest", get(handlers::latest_handler))
        .route("/{rover}/photos", get(handlers::photos_handler))
        .route("/{rover}/all", get(handlers::all_handler))
        .route("/{rover}/sol", get(handlers::sol_handler))
        .route("/{rover}/latest_sol", get(handlers::latest_sol_handler));

    Router::new()
        .nest("/api", api)
        .route("/files/{*path}", get(files::files_handler))
        .route("/health", get(handlers::health_handler))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(log_request))
        .with_state(state)
}

/// Logs the method, path, status and latency of every request
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        "{} {} {} - {:.1} ms",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    response
}
