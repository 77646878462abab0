//! REST API over the loaded weekly series.
//!
//! Provides GET endpoints:
//! - `/data/weekly` — the joined weekly series
//! - `/data/predict` — next-week forecast
//! - `/data/analysis` — series plus weather/outcome correlations
//! - `/data/summary` — outcome averages grouped by weather column
//! - `/data/correlation?x=&y=` — correlation of any two columns
//! - `/data/average?group=&target=` — grouped average of any two columns

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::record::WeeklyRecord;

pub use types::ErrorResponse;

/// Immutable application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; handlers only read it.
pub struct AppState {
    /// Configuration the server was started with.
    pub config: AppConfig,
    /// Weekly series, ascending by week.
    pub records: Vec<WeeklyRecord>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/data/weekly", get(handlers::get_weekly))
        .route("/data/predict", get(handlers::get_predict))
        .route("/data/analysis", get(handlers::get_analysis))
        .route("/data/summary", get(handlers::get_summary))
        .route("/data/correlation", get(handlers::get_correlation))
        .route("/data/average", get(handlers::get_average))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
