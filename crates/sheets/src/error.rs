#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The service-account key could not be read, parsed, or used to sign.
    #[error("Credential error: {0}")]
    Credentials(String),

    /// The OAuth2 token endpoint rejected the assertion.
    #[error("Token exchange failed: {0}")]
    Token(String),

    /// Transport-level failure talking to Google.
    #[error("Sheets request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets API answered with a non-success status.
    #[error("Sheets API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// No spreadsheet is configured for this process.
    #[error("Sheet writer is not configured")]
    NotConfigured,
}
