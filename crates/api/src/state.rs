use std::sync::Arc;

use facepair_core::{ImageResolver, Pair};
use facepair_sheets::SheetWriter;

use crate::config::ServerConfig;
use crate::sessions::SessionStore;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The loaded pair table, in annotation order. Immutable after startup.
    pub pairs: Arc<Vec<Pair>>,
    /// Identifier-to-resource mapping for the configured image mode.
    pub resolver: Arc<ImageResolver>,
    /// Per-browser-session annotation state, keyed by opaque session id.
    pub sessions: Arc<SessionStore>,
    /// The annotation record sink (spreadsheet, memory, or disabled).
    pub writer: Arc<SheetWriter>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
