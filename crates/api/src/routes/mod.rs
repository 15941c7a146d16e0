pub mod health;
pub mod images;
pub mod page;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions                      start or resume a session (POST)
/// /sessions/{id}                 render snapshot (GET)
/// /sessions/{id}/answers         initial same/different submission (POST)
/// /sessions/{id}/reflection      follow-up after a wrong answer (POST)
/// /sessions/{id}/restart         forget progress, traverse again (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    session::router()
}
