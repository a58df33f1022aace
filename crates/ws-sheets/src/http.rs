//! Error mapping for Google API responses.
//!
//! The Sheets API reports failures as
//! `{"error": {"code": 400, "message": "...", "status": "INVALID_ARGUMENT"}}`;
//! the OAuth token endpoint as `{"error": "invalid_grant", "error_description": "..."}`.
//! Both are reduced to [`SheetsError::Api`] carrying the human-readable
//! message, so callers can tell a bad range from a missing spreadsheet.

use serde::Deserialize;

use crate::error::SheetsError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    /// Sheets v4 (google.rpc.Status).
    Status {
        #[serde(default)]
        message: String,
        #[serde(default)]
        status: String,
    },
    /// OAuth2 token endpoint.
    Code(String),
}

/// Best-effort message out of an error body. Falls back to the raw text.
fn error_message(body: &str) -> String {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return body.trim().to_string();
    };
    match envelope.error {
        ErrorBody::Status { message, status } if message.is_empty() => status,
        ErrorBody::Status { message, status } if status.is_empty() => message,
        ErrorBody::Status { message, status } => format!("{status}: {message}"),
        ErrorBody::Code(code) => match envelope.error_description {
            Some(description) => format!("{code}: {description}"),
            None => code,
        },
    }
}

/// Pass successful responses through; turn everything else into a
/// [`SheetsError`].
///
/// 429 becomes [`SheetsError::RateLimited`] so reads can back off.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SheetsError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        });
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SheetsError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn retry_after_secs(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, body: impl Into<String>) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.into())
                .unwrap(),
        )
    }

    fn google_error(code: u16, status: &str, message: &str) -> String {
        serde_json::json!({
            "error": { "code": code, "message": message, "status": status }
        })
        .to_string()
    }

    #[test]
    fn sheets_error_body_keeps_status_and_message() {
        let body = google_error(
            400,
            "INVALID_ARGUMENT",
            "Unable to parse range: 'Membri'!A2:E",
        );
        assert_eq!(
            error_message(&body),
            "INVALID_ARGUMENT: Unable to parse range: 'Membri'!A2:E"
        );
    }

    #[test]
    fn oauth_error_body_uses_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid JWT."}"#;
        assert_eq!(error_message(body), "invalid_grant: Invalid JWT.");
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        assert_eq!(error_message("  Bad Gateway\n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn missing_tab_is_recognized_from_body() {
        let body = google_error(
            400,
            "INVALID_ARGUMENT",
            "Unable to parse range: Inscrieri!A:O",
        );
        let err = check_response(response(400, body)).await.unwrap_err();
        assert!(err.is_missing_sheet());
    }

    #[tokio::test]
    async fn other_bad_requests_are_not_missing_tabs() {
        let body = google_error(
            400,
            "INVALID_ARGUMENT",
            "Your input contains more than the maximum of 50000 characters in a single cell.",
        );
        let err = check_response(response(400, body)).await.unwrap_err();
        assert!(matches!(err, SheetsError::Api { status: 400, .. }));
        assert!(!err.is_missing_sheet());
    }

    #[tokio::test]
    async fn missing_spreadsheet_is_not_a_missing_tab() {
        let body = google_error(404, "NOT_FOUND", "Requested entity was not found.");
        let err = check_response(response(404, body)).await.unwrap_err();
        assert!(matches!(err, SheetsError::Api { status: 404, .. }));
        assert!(!err.is_missing_sheet());
    }

    #[tokio::test]
    async fn rate_limit_honors_retry_after() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", "12")
                .body(String::new())
                .unwrap(),
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, SheetsError::RateLimited { retry_after_secs: 12 }));

        let err = check_response(response(429, "")).await.unwrap_err();
        assert!(matches!(err, SheetsError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, "{}")).await.is_ok());
    }
}
