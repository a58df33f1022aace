//! Spreadsheet adapter error types.

use thiserror::Error;

/// Marker Google puts in the message when a range names an absent tab.
const UNPARSABLE_RANGE: &str = "Unable to parse range";

/// Errors that can occur when reading or writing spreadsheets.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Could not obtain an access token for the service account.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A response or range could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The addressed tab does not exist in the spreadsheet.
    #[error("sheet '{0}' does not exist")]
    SheetMissing(String),

    /// None of the accepted tab names exist.
    #[error("{kind} sheet not found (tried {})", .tried.join(", "))]
    SheetNotFound {
        /// What the tab holds (`settings`, `roster`, ...).
        kind: &'static str,
        /// Names tried, in order.
        tried: Vec<String>,
    },
}

impl SheetsError {
    /// Whether the error means "no tab with this name", as opposed to a
    /// transport or permission failure.
    ///
    /// Google answers a range on a missing tab with `400 Unable to parse range`.
    /// Any other 400, and a 404 for a missing or mistyped spreadsheet id,
    /// is a real failure.
    #[must_use]
    pub fn is_missing_sheet(&self) -> bool {
        match self {
            Self::SheetMissing(_) => true,
            Self::Api { status: 400, message } => message.contains(UNPARSABLE_RANGE),
            _ => false,
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
