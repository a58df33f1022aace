//! Service-account OAuth for the Sheets API.
//!
//! Signs a short-lived RS256 assertion with the service account's private
//! key, exchanges it at the token endpoint, and caches the access token until
//! shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::SheetsError;
use crate::http::check_response;

/// Read/write access to spreadsheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_BUFFER_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

const fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_BUFFER_SECS) < self.expires_at
    }
}

pub struct ServiceAccountAuth {
    client_email: String,
    token_url: String,
    key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ServiceAccountAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountAuth")
            .field("client_email", &self.client_email)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountAuth {
    /// # Errors
    ///
    /// Returns [`SheetsError::Auth`] if `private_key_pem` is not a valid RSA
    /// private key.
    pub fn new(
        client_email: impl Into<String>,
        private_key_pem: &str,
        token_url: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| SheetsError::Auth(format!("invalid service account key: {e}")))?;
        Ok(Self {
            client_email: client_email.into(),
            token_url: token_url.into(),
            key,
            cached: Mutex::new(None),
        })
    }

    /// A valid access token, fetching a new one when the cached token is
    /// missing or about to expire.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] if signing the assertion or the token exchange
    /// fails.
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.fetch_token(http, now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| SheetsError::Auth(format!("failed to sign assertion: {e}")))
    }

    async fn fetch_token(
        &self,
        http: &reqwest::Client,
        now: DateTime<Utc>,
    ) -> Result<CachedToken, SheetsError> {
        let body = format!(
            "grant_type={}&assertion={}",
            urlencoding::encode(JWT_BEARER_GRANT),
            urlencoding::encode(&self.assertion(now)?)
        );
        let resp = http
            .post(&self.token_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;
        let resp = check_response(resp).await.map_err(|e| match e {
            SheetsError::Api { status, message } => {
                SheetsError::Auth(format!("token endpoint returned {status}: {message}"))
            }
            other => other,
        })?;

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| SheetsError::Parse(format!("token response: {e}")))?;
        tracing::debug!(
            client_email = %self.client_email,
            expires_in = token.expires_in,
            "obtained sheets access token"
        );

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
