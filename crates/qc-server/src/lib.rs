//! # qc-server
//!
//! HTTP API over the qualcode database: the flat code list, the editable code
//! tree, codings and sources. Requests under `/api` pass through the identity
//! allow-list; `/health` does not.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;
pub mod widget;

use std::net::SocketAddr;

use axum::Router;
use axum::middleware;
use axum::routing::{get, put};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ServerError};
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/code",
            get(handlers::code::list_codes)
                .post(handlers::code::create_code)
                .put(handlers::code::move_code),
        )
        .route("/code/:id/codings", get(handlers::code::code_codings))
        .route("/update-code-parents", put(handlers::code::update_code_parents))
        .route(
            "/code-tree",
            get(handlers::tree::get_code_tree).put(handlers::tree::save_code_tree),
        )
        .route(
            "/coding",
            axum::routing::post(handlers::coding::create_coding)
                .put(handlers::coding::update_coding),
        )
        .route(
            "/source",
            get(handlers::source::list_sources).post(handlers::source::create_source),
        )
        .route("/source/summary", get(handlers::source::review_summary))
        .route(
            "/source/:number",
            get(handlers::source::source_detail).put(handlers::source::update_source),
        )
        .route("/source/:number/review", put(handlers::source::review_source))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_allowed_identity,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns `ServerError` if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(addr = %local, "qualcode server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
