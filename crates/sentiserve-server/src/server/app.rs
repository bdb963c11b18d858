use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sentiserve_model::Predictor;
use tower_http::cors::{Any, CorsLayer};

use crate::server::routes;

/// Shared handler state: the lazily-loading predictor.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

/// Build the axum application.
pub fn build_app(predictor: Arc<Predictor>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/healthz", get(routes::health))
        .route("/predict", post(routes::predict))
        .layer(cors)
        .with_state(AppState { predictor })
}

/// Run the server until the task is cancelled.
pub async fn run_server(predictor: Arc<Predictor>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(predictor);

    tracing::info!("starting sentiserve on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
