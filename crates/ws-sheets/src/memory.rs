//! In-process spreadsheet backend.
//!
//! Behaves like the Sheets API for the handful of operations the workbook
//! uses: trailing blank cells are trimmed on read, appends land after the
//! last non-empty row, and addressing an unknown tab fails with
//! [`SheetsError::SheetMissing`]. Used by `wsreg serve --in-memory` and tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::SheetsError;
use crate::range::A1Range;
use crate::{SheetBackend, Values};

type Tabs = HashMap<String, Values>;

#[derive(Debug, Default)]
pub struct MemorySheets {
    spreadsheets: RwLock<HashMap<String, Tabs>>,
}

impl MemorySheets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tab with rows (row 1 first).
    #[must_use]
    pub fn with_sheet(self, spreadsheet_id: &str, title: &str, rows: Values) -> Self {
        self.spreadsheets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(spreadsheet_id.to_string())
            .or_default()
            .insert(title.to_string(), rows);
        self
    }

    /// Snapshot of a tab's rows, if the tab exists.
    #[must_use]
    pub fn sheet(&self, spreadsheet_id: &str, title: &str) -> Option<Values> {
        self.spreadsheets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(spreadsheet_id)
            .and_then(|tabs| tabs.get(title))
            .cloned()
    }

    /// Tab titles of a spreadsheet, sorted.
    #[must_use]
    pub fn titles(&self, spreadsheet_id: &str) -> Vec<String> {
        let mut titles: Vec<String> = self
            .spreadsheets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(spreadsheet_id)
            .map(|tabs| tabs.keys().cloned().collect())
            .unwrap_or_default();
        titles.sort();
        titles
    }
}

fn last_used_row(rows: &Values) -> usize {
    rows.iter()
        .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
        .map_or(0, |idx| idx + 1)
}

fn trim_trailing_blanks(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(String::is_empty) {
        row.pop();
    }
    row
}

fn write_at(rows: &mut Values, first_row: usize, first_col: usize, values: Values) {
    for (offset, new_row) in values.into_iter().enumerate() {
        let idx = first_row + offset;
        if rows.len() <= idx {
            rows.resize_with(idx + 1, Vec::new);
        }
        let row = &mut rows[idx];
        if row.len() < first_col + new_row.len() {
            row.resize(first_col + new_row.len(), String::new());
        }
        for (col, cell) in new_row.into_iter().enumerate() {
            row[first_col + col] = cell;
        }
    }
}

#[async_trait]
impl SheetBackend for MemorySheets {
    async fn read_values(&self, spreadsheet_id: &str, range: &str) -> Result<Values, SheetsError> {
        let range = A1Range::parse(range)?;
        let guard = self
            .spreadsheets
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let rows = guard
            .get(spreadsheet_id)
            .and_then(|tabs| tabs.get(&range.sheet))
            .ok_or_else(|| SheetsError::SheetMissing(range.sheet.clone()))?;

        let first = range.start_row.map_or(0, |row| row - 1);
        let last = range.end_row.unwrap_or(usize::MAX).min(last_used_row(rows));

        let values = rows
            .iter()
            .take(last)
            .skip(first)
            .map(|row| {
                let end = range.end_col.map_or(row.len(), |col| (col + 1).min(row.len()));
                let cells = row.get(range.start_col..end).unwrap_or_default().to_vec();
                trim_trailing_blanks(cells)
            })
            .collect();
        Ok(values)
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Values,
    ) -> Result<(), SheetsError> {
        let range = A1Range::parse(range)?;
        let mut guard = self
            .spreadsheets
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let existing = guard
            .get_mut(spreadsheet_id)
            .and_then(|tabs| tabs.get_mut(&range.sheet))
            .ok_or_else(|| SheetsError::SheetMissing(range.sheet.clone()))?;

        let next = last_used_row(existing);
        write_at(existing, next, range.start_col, rows);
        Ok(())
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: Values,
    ) -> Result<(), SheetsError> {
        let range = A1Range::parse(range)?;
        let mut guard = self
            .spreadsheets
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let existing = guard
            .get_mut(spreadsheet_id)
            .and_then(|tabs| tabs.get_mut(&range.sheet))
            .ok_or_else(|| SheetsError::SheetMissing(range.sheet.clone()))?;

        let first = range.start_row.map_or(0, |row| row - 1);
        write_at(existing, first, range.start_col, rows);
        Ok(())
    }

    async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), SheetsError> {
        let mut guard = self
            .spreadsheets
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let tabs = guard.entry(spreadsheet_id.to_string()).or_default();
        if tabs.contains_key(title) {
            return Err(SheetsError::Api {
                status: 409,
                message: format!("A sheet with the name \"{title}\" already exists."),
            });
        }
        tabs.insert(title.to_string(), Vec::new());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(ToString::to_string).collect()
    }

    fn sheets() -> MemorySheets {
        MemorySheets::new().with_sheet(
            "doc",
            "Membri",
            vec![
                row(&["Prenume", "Nume", "Companie", "Email", "Telefon", "Extra"]),
                row(&["Ion", "Popescu", "", "ion@x.com", "0724", "x"]),
                row(&["Ana", "Ionescu", "Acme", "", "", ""]),
                row(&["", "", ""]),
            ],
        )
    }

    #[tokio::test]
    async fn read_skips_header_and_clips_columns() {
        let values = sheets().read_values("doc", "'Membri'!A2:E").await.unwrap();
        assert_eq!(
            values,
            vec![
                row(&["Ion", "Popescu", "", "ion@x.com", "0724"]),
                row(&["Ana", "Ionescu", "Acme"]),
            ]
        );
    }

    #[tokio::test]
    async fn reading_unknown_tab_is_missing_sheet() {
        let err = sheets().read_values("doc", "Members!A2:E").await.unwrap_err();
        assert!(matches!(err, SheetsError::SheetMissing(ref name) if name == "Members"));
        assert!(err.is_missing_sheet());
    }

    #[tokio::test]
    async fn append_lands_after_last_used_row() {
        let sheets = sheets();
        sheets
            .append_values("doc", "Membri!A:E", vec![row(&["Maria", "Pop"])])
            .await
            .unwrap();
        let rows = sheets.sheet("doc", "Membri").unwrap();
        assert_eq!(rows[3], row(&["Maria", "Pop", ""]));
    }

    #[tokio::test]
    async fn add_sheet_then_update_header() {
        let sheets = MemorySheets::new();
        sheets.add_sheet("doc", "Inscrieri").await.unwrap();
        sheets
            .update_values("doc", "Inscrieri!A1:B1", vec![row(&["Timestamp", "Workshop"])])
            .await
            .unwrap();
        assert_eq!(
            sheets.sheet("doc", "Inscrieri"),
            Some(vec![row(&["Timestamp", "Workshop"])])
        );
        assert!(sheets.add_sheet("doc", "Inscrieri").await.is_err());
        assert_eq!(sheets.titles("doc"), vec!["Inscrieri".to_string()]);
    }
}
