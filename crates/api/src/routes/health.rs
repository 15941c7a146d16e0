use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use facepair_sheets::SheetWriter;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of pairs loaded from the input table.
    pub pairs: usize,
    /// Whether a spreadsheet backend is configured.
    pub sheet_configured: bool,
    /// Image resolution mode (`local` or `url`).
    pub image_mode: &'static str,
}

/// GET /health -- returns service status and configuration summary.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sheet_configured = !matches!(&*state.writer, SheetWriter::Disabled);

    let status = if sheet_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        pairs: state.pairs.len(),
        sheet_configured,
        image_mode: if state.config.use_image_urls { "url" } else { "local" },
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
