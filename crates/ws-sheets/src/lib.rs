//! # ws-sheets
//!
//! Spreadsheet access for wsreg.
//!
//! Every workshop keeps its data in one spreadsheet with three tabs: a
//! key/value settings tab, the member roster, and the registrations log.
//! Tab names vary between workshops, so [`Workbook`] tries a list of
//! accepted names for each.
//!
//! Two [`SheetBackend`] implementations are provided:
//! - [`GoogleSheetsClient`]: Sheets v4 REST with a service account
//! - [`MemorySheets`]: in-process, for local runs and tests

pub mod auth;
pub mod error;
pub mod google;
mod http;
pub mod memory;
pub mod range;
pub mod workbook;

pub use auth::ServiceAccountAuth;
pub use error::SheetsError;
pub use google::GoogleSheetsClient;
pub use memory::MemorySheets;
pub use workbook::{
    REGISTRATION_SHEETS, ROSTER_SHEETS, SETTINGS_SHEETS, Workbook, WorkshopSettings,
};

use async_trait::async_trait;

/// Cell values of a range, row-major. Trailing empty cells and rows may be
/// omitted by the backend.
pub type Values = Vec<Vec<String>>;

/// Raw range operations on a spreadsheet.
///
/// `range` is always sheet-qualified A1 notation (`'Membri'!A2:E`).
#[async_trait]
pub trait SheetBackend: Send + Sync {
    /// Read the values in `range`.
    async fn read_values(&self, spreadsheet_id: &str, range: &str) -> Result<Values, SheetsError>;

    /// Append `rows` after the last non-empty row of the table in `range`.
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Values,
    ) -> Result<(), SheetsError>;

    /// Overwrite the cells starting at the top-left of `range`.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Values,
    ) -> Result<(), SheetsError>;

    /// Add an empty tab named `title`.
    async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), SheetsError>;
}
