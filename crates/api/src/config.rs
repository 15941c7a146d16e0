use std::path::PathBuf;

use facepair_core::ImageResolver;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (a `.env` file is read at startup).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path to the pair table CSV (default: `pairs.csv`).
    pub pairs_csv: String,
    /// Local image directory, used when `use_image_urls` is off.
    pub image_base_path: String,
    /// Serve images from a remote base URL instead of the local directory.
    pub use_image_urls: bool,
    /// Base URL prefixed to image identifiers in URL mode.
    pub image_url_base: String,
    /// Destination spreadsheet. `None` disables the sheet writer.
    pub spreadsheet_id: Option<String>,
    /// Path to the service-account key JSON (default: `credentials.json`).
    pub credentials_file: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `3000`                   |
    /// | `CORS_ORIGINS`            | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `PAIRS_CSV`               | `pairs.csv`              |
    /// | `IMAGE_BASE_PATH`         | `images/`                |
    /// | `USE_IMAGE_URLS`          | `false`                  |
    /// | `IMAGE_URL_BASE`          | (empty)                  |
    /// | `SPREADSHEET_ID`          | unset (writer disabled)  |
    /// | `GOOGLE_CREDENTIALS_FILE` | `credentials.json`       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let pairs_csv = std::env::var("PAIRS_CSV").unwrap_or_else(|_| "pairs.csv".into());

        let image_base_path =
            std::env::var("IMAGE_BASE_PATH").unwrap_or_else(|_| "images/".into());

        let use_image_urls: bool = std::env::var("USE_IMAGE_URLS")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("USE_IMAGE_URLS must be 'true' or 'false'");

        let image_url_base = std::env::var("IMAGE_URL_BASE").unwrap_or_default();

        let spreadsheet_id = std::env::var("SPREADSHEET_ID").ok().filter(|s| !s.is_empty());

        let credentials_file =
            std::env::var("GOOGLE_CREDENTIALS_FILE").unwrap_or_else(|_| "credentials.json".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            pairs_csv,
            image_base_path,
            use_image_urls,
            image_url_base,
            spreadsheet_id,
            credentials_file,
        }
    }

    /// Build the image resolver for the configured mode.
    pub fn image_resolver(&self) -> ImageResolver {
        if self.use_image_urls {
            ImageResolver::RemoteUrl(self.image_url_base.clone())
        } else {
            ImageResolver::LocalDir(PathBuf::from(&self.image_base_path))
        }
    }
}
