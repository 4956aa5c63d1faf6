//! HTTP gateway: routes, request logging, server loop.

pub mod handlers;
pub mod problem;
pub mod state;
pub mod types;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{Next, from_fn},
    response::Response,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

pub use problem::Problem;
pub use state::AppState;

/// Log method, path, status, and elapsed time for every request.
async fn request_log(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );
    response
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/balances/{id}", get(handlers::get_balance))
        .route("/balances/history/{id}", get(handlers::get_history))
        .route("/balances/transfer", post(handlers::transfer))
        .route("/balances/income", post(handlers::income))
        .route("/balances/outcome", post(handlers::outcome))
        .layer(from_fn(request_log))
        .with_state(state)
}

/// Bind and serve until the state's shutdown token fires.
pub async fn run_server(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let shutdown = state.shutdown.clone();
    let app = router(state);

    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!("gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("gateway stopped");
    Ok(())
}
