//! Route definitions for the session and submission endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{annotation, session};
use crate::state::AppState;

/// Build the `/sessions` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(session::create_session))
        .route("/sessions/{id}", get(session::get_session))
        .route("/sessions/{id}/answers", post(annotation::submit_answer))
        .route(
            "/sessions/{id}/reflection",
            post(annotation::submit_reflection),
        )
        .route("/sessions/{id}/restart", post(session::restart_session))
}
