use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facepair_api::config::ServerConfig;
use facepair_api::router::build_app_router;
use facepair_api::sessions::SessionStore;
use facepair_api::state::AppState;
use facepair_sheets::{ServiceAccountKey, SheetWriter, SheetsClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facepair_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Pair table ---
    let pairs = facepair_core::load_pairs(&config.pairs_csv)
        .unwrap_or_else(|e| panic!("Failed to load pair table '{}': {e}", config.pairs_csv));
    assert!(!pairs.is_empty(), "Pair table '{}' has no rows", config.pairs_csv);
    tracing::info!(pairs = pairs.len(), source = %config.pairs_csv, "Pair table loaded");

    // --- Image resolver ---
    let resolver = config.image_resolver();
    tracing::info!(?resolver, "Image resolver configured");

    // --- Sheet writer ---
    let writer = build_sheet_writer(&config);

    // --- App state ---
    let state = AppState {
        pairs: Arc::new(pairs),
        resolver: Arc::new(resolver),
        sessions: Arc::new(SessionStore::new()),
        writer: Arc::new(writer),
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Nothing to tear down: sessions are in-memory and the sheet handle
    // needs no explicit close.
    tracing::info!("Graceful shutdown complete");
}

/// Build the sheet writer from configuration.
///
/// Runs with the writer disabled (appends will fail, resume finds nothing)
/// when no spreadsheet is configured or the key cannot be loaded, so the
/// interface stays usable for dry runs.
fn build_sheet_writer(config: &ServerConfig) -> SheetWriter {
    let Some(spreadsheet_id) = config.spreadsheet_id.clone() else {
        tracing::warn!("SPREADSHEET_ID not set; running without Google Sheets, annotations will not be saved");
        return SheetWriter::Disabled;
    };

    if !Path::new(&config.credentials_file).exists() {
        tracing::warn!(
            credentials_file = %config.credentials_file,
            "No credentials found; running without Google Sheets, annotations will not be saved"
        );
        return SheetWriter::Disabled;
    }

    match ServiceAccountKey::from_file(&config.credentials_file) {
        Ok(key) => {
            tracing::info!(
                spreadsheet_id = %spreadsheet_id,
                client_email = %key.client_email,
                "Sheet writer configured"
            );
            SheetWriter::Google(SheetsClient::new(key, spreadsheet_id))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not load credentials; running without Google Sheets");
            SheetWriter::Disabled
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
