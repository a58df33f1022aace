//! Google Sheets v4 REST backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use ws_config::SheetsConfig;

use crate::auth::ServiceAccountAuth;
use crate::error::SheetsError;
use crate::http::check_response;
use crate::{SheetBackend, Values};

/// Backoff for idempotent reads that fail transiently.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Backoff is capped here, including server-requested `Retry-After`.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    fn delay_for(&self, attempt: u32, err: &SheetsError) -> Duration {
        let backoff = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay);
        match err {
            SheetsError::RateLimited { retry_after_secs } => {
                Duration::from_secs(*retry_after_secs).clamp(backoff, self.max_delay)
            }
            _ => backoff,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Sheets API cells come back as JSON strings, numbers, or booleans
/// depending on the cell format.
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug)]
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    auth: ServiceAccountAuth,
    base_url: String,
    retry: RetryPolicy,
}

impl GoogleSheetsClient {
    /// Build a client from the `sheets` config section.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Auth`] if the private key is unusable, or
    /// [`SheetsError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SheetsConfig) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wsreg/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let auth = ServiceAccountAuth::new(
            config.service_account_email.as_str(),
            &config.private_key_pem(),
            config.token_url.as_str(),
        )?;
        Ok(Self {
            http,
            auth,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy {
                retries: config.read_retries,
                ..RetryPolicy::default()
            },
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range)
        )
    }

    async fn read_once(&self, url: &str) -> Result<Values, SheetsError> {
        let token = self.auth.access_token(&self.http).await?;
        let resp = self.http.get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp).await?;
        let body: ValueRange = resp
            .json()
            .await
            .map_err(|e| SheetsError::Parse(format!("value range: {e}")))?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn write(
        &self,
        method: reqwest::Method,
        url: String,
        body: &Value,
    ) -> Result<(), SheetsError> {
        let token = self.auth.access_token(&self.http).await?;
        let resp = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl SheetBackend for GoogleSheetsClient {
    async fn read_values(&self, spreadsheet_id: &str, range: &str) -> Result<Values, SheetsError> {
        let url = self.values_url(spreadsheet_id, range);
        let mut attempt = 0;
        loop {
            match self.read_once(&url).await {
                Err(e) if e.is_transient() && attempt < self.retry.retries => {
                    let delay = self.retry.delay_for(attempt, &e);
                    attempt += 1;
                    tracing::warn!(
                        range,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "sheets read failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Values,
    ) -> Result<(), SheetsError> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(spreadsheet_id, range)
        );
        self.write(reqwest::Method::POST, url, &json!({ "values": rows }))
            .await
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Values,
    ) -> Result<(), SheetsError> {
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(spreadsheet_id, range)
        );
        self.write(reqwest::Method::PUT, url, &json!({ "values": rows }))
            .await
    }

    async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), SheetsError> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.base_url,
            urlencoding::encode(spreadsheet_id)
        );
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        self.write(reqwest::Method::POST, url, &body).await
    }
}
