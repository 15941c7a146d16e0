//! The annotation page itself.
//!
//! A single static HTML document that drives the JSON API; inlined into the
//! binary so deployment is one executable plus the pair table and images.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / -- the annotation interface.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Mount the page at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
