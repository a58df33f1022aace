//! The three tabs of a workshop spreadsheet.

use std::collections::BTreeMap;
use std::sync::Arc;

use ws_core::registration::REGISTRATION_HEADERS;
use ws_core::{RegistrationRow, RosterEntry};

use crate::error::SheetsError;
use crate::range::qualified;
use crate::{SheetBackend, Values};

/// Accepted names of the key/value settings tab, tried in order.
pub const SETTINGS_SHEETS: [&str; 3] = ["Configurare Workshop", "Config", "Configurare"];

/// Accepted names of the member roster tab, tried in order.
pub const ROSTER_SHEETS: [&str; 3] = ["Membri", "Membrii", "Members"];

/// Accepted names of the registrations tab, tried in order. The first one
/// is created when none exists.
pub const REGISTRATION_SHEETS: [&str; 3] = ["Inscrieri", "Registrations", "Înscrieri"];

const SETTINGS_CELLS: &str = "A:B";
const ROSTER_CELLS: &str = "A2:E";
const REGISTRATION_CELLS: &str = "A:O";
const HEADER_CELLS: &str = "A1:O1";

/// Settings tab contents: column A key → column B value.
pub type WorkshopSettings = BTreeMap<String, String>;

#[derive(Clone)]
pub struct Workbook {
    backend: Arc<dyn SheetBackend>,
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook").finish_non_exhaustive()
    }
}

impl Workbook {
    #[must_use]
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self { backend }
    }

    /// Read `cells` from the first tab in `names` that exists.
    ///
    /// Returns `Ok(None)` when none of them exists. Errors other than a
    /// missing tab stop the search.
    async fn read_first(
        &self,
        spreadsheet_id: &str,
        names: &[&'static str],
        cells: &str,
    ) -> Result<Option<(&'static str, Values)>, SheetsError> {
        for &name in names {
            match self
                .backend
                .read_values(spreadsheet_id, &qualified(name, cells))
                .await
            {
                Ok(values) => return Ok(Some((name, values))),
                Err(e) if e.is_missing_sheet() => {
                    tracing::debug!(sheet = name, error = %e, "sheet not found, trying next name");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Key/value pairs of the settings tab. Rows with an empty key or value
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::SheetNotFound`] when no settings tab exists, or
    /// the backend error.
    pub async fn workshop_settings(
        &self,
        spreadsheet_id: &str,
    ) -> Result<WorkshopSettings, SheetsError> {
        let Some((_, values)) = self
            .read_first(spreadsheet_id, &SETTINGS_SHEETS, SETTINGS_CELLS)
            .await?
        else {
            return Err(not_found("settings", &SETTINGS_SHEETS));
        };

        Ok(values
            .into_iter()
            .filter_map(|row| {
                let mut cells = row.into_iter();
                let key = cells.next()?.trim().to_string();
                let value = cells.next()?.trim().to_string();
                (!key.is_empty() && !value.is_empty()).then_some((key, value))
            })
            .collect())
    }

    /// Roster entries, header row excluded.
    ///
    /// A spreadsheet without a roster tab yields an empty roster, so every
    /// registrant of that workshop pays the standard price.
    ///
    /// # Errors
    ///
    /// Returns the backend error for anything other than a missing tab.
    pub async fn roster(&self, spreadsheet_id: &str) -> Result<Vec<RosterEntry>, SheetsError> {
        match self
            .read_first(spreadsheet_id, &ROSTER_SHEETS, ROSTER_CELLS)
            .await?
        {
            Some((sheet, values)) => {
                let roster = parse_roster(values);
                tracing::debug!(sheet, members = roster.len(), "loaded roster");
                Ok(roster)
            }
            None => {
                tracing::warn!(
                    spreadsheet_id,
                    tried = ?ROSTER_SHEETS,
                    "roster sheet not found, treating everyone as non-member"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Append one registration, creating the registrations tab (with its
    /// header row) when missing. Returns the tab name written to.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] if the tab cannot be created or written.
    pub async fn append_registration(
        &self,
        spreadsheet_id: &str,
        row: &RegistrationRow,
    ) -> Result<&'static str, SheetsError> {
        let cells = vec![row.cells()];

        for &name in &REGISTRATION_SHEETS {
            match self
                .backend
                .append_values(spreadsheet_id, &qualified(name, REGISTRATION_CELLS), cells.clone())
                .await
            {
                Ok(()) => {
                    tracing::info!(sheet = name, workshop = %row.workshop, "registration saved");
                    return Ok(name);
                }
                Err(e) if e.is_missing_sheet() => {
                    tracing::debug!(sheet = name, error = %e, "sheet not found, trying next name");
                }
                Err(e) => return Err(e),
            }
        }

        let name = REGISTRATION_SHEETS[0];
        tracing::info!(spreadsheet_id, sheet = name, "creating registrations sheet");
        self.backend.add_sheet(spreadsheet_id, name).await?;
        let header = vec![REGISTRATION_HEADERS.iter().map(ToString::to_string).collect()];
        self.backend
            .update_values(spreadsheet_id, &qualified(name, HEADER_CELLS), header)
            .await?;
        self.backend
            .append_values(spreadsheet_id, &qualified(name, REGISTRATION_CELLS), cells)
            .await?;
        tracing::info!(sheet = name, workshop = %row.workshop, "registration saved");
        Ok(name)
    }
}

fn not_found(kind: &'static str, names: &[&str]) -> SheetsError {
    SheetsError::SheetNotFound {
        kind,
        tried: names.iter().map(ToString::to_string).collect(),
    }
}

/// Turn roster rows (columns A..E: first name, last name, company, email,
/// phone) into entries. Short rows are padded with empty strings; fully
/// blank rows are skipped.
#[must_use]
pub fn parse_roster(values: Values) -> Vec<RosterEntry> {
    values
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            let mut cells = row.into_iter().map(|cell| cell.trim().to_string());
            let mut next = || cells.next().unwrap_or_default();
            let (first_name, last_name, company) = (next(), next(), next());
            let (email, phone) = (next(), next());
            RosterEntry::new(first_name, last_name, email, phone).with_company(company)
        })
        .collect()
}
