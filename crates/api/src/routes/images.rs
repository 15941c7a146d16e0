//! Root-level image serving route (local-dir mode).

use axum::routing::get;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Build the `/images` router.
pub fn router() -> Router<AppState> {
    Router::new().route("/images/{file}", get(images::get_image))
}
