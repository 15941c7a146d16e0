//! OAuth2 JWT-bearer token flow for the Sheets API.
//!
//! A [`TokenProvider`] signs an RS256 assertion with the service-account
//! key and exchanges it at the token endpoint for a short-lived access
//! token. The token is cached process-wide and only re-fetched shortly
//! before expiry, so the process authenticates once and reuses the handle.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

/// OAuth2 scope granting spreadsheet read/write access.
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Assertion lifetime in seconds (the maximum Google accepts).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh the cached token this many seconds before it expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// JWT claims of the service-account assertion.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// A cached access token with its absolute expiry time.
#[derive(Debug, Clone)]
pub(crate) struct CachedToken {
    pub(crate) token: String,
    pub(crate) expires_at: i64,
}

impl CachedToken {
    /// Whether the token is still safe to use at `now` (Unix seconds).
    pub(crate) fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at - EXPIRY_MARGIN_SECS
    }
}

/// Lazily-initialized, process-wide access token source.
pub struct TokenProvider {
    key: ServiceAccountKey,
    http: reqwest::Client,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Self {
        Self {
            key,
            http,
            cached: RwLock::new(None),
        }
    }

    /// Return a valid access token, fetching or refreshing as needed.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let now = chrono::Utc::now().timestamp();

        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.is_fresh(now) {
                return Ok(cached.token.clone());
            }
        }

        // Re-check under the write lock: another request may have already
        // refreshed while we waited.
        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.fetch_token(now).await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);

        tracing::info!(client_email = %self.key.client_email, "Obtained Sheets access token");
        Ok(token)
    }

    async fn fetch_token(&self, now: i64) -> Result<CachedToken, SheetsError> {
        let assertion = self.sign_assertion(now)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Token(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Token(format!("malformed token response: {e}")))?;

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }

    fn sign_assertion(&self, now: i64) -> Result<String, SheetsError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credentials(format!("invalid private key: {e}")))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| SheetsError::Credentials(format!("could not sign assertion: {e}")))
    }
}
