//! Tab-name fallback behavior of `Workbook`, exercised against the
//! in-memory backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use ws_core::registration::REGISTRATION_HEADERS;
use ws_core::{RegistrationForm, RegistrationRow, RosterEntry};
use ws_sheets::{MemorySheets, SheetBackend, SheetsError, Values, Workbook};

const DOC: &str = "sheet-sm";

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(ToString::to_string).collect()
}

fn workbook(sheets: MemorySheets) -> (Arc<MemorySheets>, Workbook) {
    let sheets = Arc::new(sheets);
    (sheets.clone(), Workbook::new(sheets))
}

fn registration() -> RegistrationRow {
    let form = RegistrationForm {
        email: "ana@x.com".into(),
        name: "Ana Ionescu".into(),
        phone: "0799999999".into(),
        gdpr_consent: true,
        ..Default::default()
    };
    let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    RegistrationRow::new("Workshop SM", &form, false, timestamp)
}

#[rstest]
#[case("Configurare Workshop")]
#[case("Config")]
#[case("Configurare")]
#[tokio::test]
async fn settings_found_under_any_accepted_name(#[case] title: &str) {
    let (_, workbook) = workbook(MemorySheets::new().with_sheet(
        DOC,
        title,
        vec![
            row(&["Titlu", "Workshop BIZZ.CLUB"]),
            row(&["Data", "12 martie"]),
            row(&["Locatie", ""]),
            row(&["", "orphan"]),
        ],
    ));

    let settings = workbook.workshop_settings(DOC).await.unwrap();
    assert_eq!(settings.len(), 2);
    assert_eq!(settings.get("Titlu").map(String::as_str), Some("Workshop BIZZ.CLUB"));
    assert_eq!(settings.get("Data").map(String::as_str), Some("12 martie"));
}

#[tokio::test]
async fn missing_settings_sheet_lists_tried_names() {
    let (_, workbook) = workbook(MemorySheets::new().with_sheet(DOC, "Membri", Vec::new()));
    let err = workbook.workshop_settings(DOC).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "settings sheet not found (tried Configurare Workshop, Config, Configurare)"
    );
}

#[rstest]
#[case("Membri")]
#[case("Membrii")]
#[case("Members")]
#[tokio::test]
async fn roster_found_under_any_accepted_name(#[case] title: &str) {
    let (_, workbook) = workbook(MemorySheets::new().with_sheet(
        DOC,
        title,
        vec![
            row(&["Prenume", "Nume", "Companie", "Email", "Telefon"]),
            row(&["Ion", "Popescu", "", "ion@x.com", "0724111222"]),
        ],
    ));

    let roster = workbook.roster(DOC).await.unwrap();
    assert_eq!(
        roster,
        vec![RosterEntry::new("Ion", "Popescu", "ion@x.com", "0724111222")]
    );
}

#[tokio::test]
async fn first_accepted_roster_name_wins() {
    let (_, workbook) = workbook(
        MemorySheets::new()
            .with_sheet(DOC, "Members", vec![row(&["h"]), row(&["Old", "Entry"])])
            .with_sheet(DOC, "Membri", vec![row(&["h"]), row(&["New", "Entry"])]),
    );
    let roster = workbook.roster(DOC).await.unwrap();
    assert_eq!(roster[0].first_name, "New");
}

#[tokio::test]
async fn missing_roster_is_empty() {
    let (_, workbook) = workbook(MemorySheets::new());
    assert!(workbook.roster(DOC).await.unwrap().is_empty());
}

#[tokio::test]
async fn append_uses_existing_registrations_sheet() {
    let (sheets, workbook) = workbook(MemorySheets::new().with_sheet(
        DOC,
        "Registrations",
        vec![REGISTRATION_HEADERS.iter().map(ToString::to_string).collect()],
    ));

    let sheet = workbook.append_registration(DOC, &registration()).await.unwrap();
    assert_eq!(sheet, "Registrations");

    let rows = sheets.sheet(DOC, "Registrations").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], registration().cells());
    assert_eq!(sheets.titles(DOC), vec!["Registrations".to_string()]);
}

#[tokio::test]
async fn append_creates_sheet_with_header_when_missing() {
    let (sheets, workbook) = workbook(MemorySheets::new().with_sheet(DOC, "Membri", Vec::new()));

    let sheet = workbook.append_registration(DOC, &registration()).await.unwrap();
    assert_eq!(sheet, "Inscrieri");

    let rows = sheets.sheet(DOC, "Inscrieri").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], row(&REGISTRATION_HEADERS));
    assert_eq!(rows[1][1], "Workshop SM");
    assert_eq!(rows[1][10], "'0000000000000");
    assert_eq!(rows[1][13], "Non-Membru");
    assert_eq!(rows[1][14], "Pret Standard");
}

/// Backend that fails every call with the same API error and counts
/// attempts to create a tab.
struct Failing {
    status: u16,
    message: &'static str,
    added: AtomicUsize,
}

impl Failing {
    fn new(status: u16, message: &'static str) -> Self {
        Self {
            status,
            message,
            added: AtomicUsize::new(0),
        }
    }

    fn error(&self) -> SheetsError {
        SheetsError::Api {
            status: self.status,
            message: self.message.into(),
        }
    }
}

#[async_trait]
impl SheetBackend for Failing {
    async fn read_values(&self, _: &str, _: &str) -> Result<Values, SheetsError> {
        Err(self.error())
    }

    async fn append_values(&self, _: &str, _: &str, _: Values) -> Result<(), SheetsError> {
        Err(self.error())
    }

    async fn update_values(&self, _: &str, _: &str, _: Values) -> Result<(), SheetsError> {
        Err(self.error())
    }

    async fn add_sheet(&self, _: &str, _: &str) -> Result<(), SheetsError> {
        self.added.fetch_add(1, Ordering::SeqCst);
        Err(self.error())
    }
}

#[tokio::test]
async fn non_missing_errors_are_not_swallowed() {
    let workbook = Workbook::new(Arc::new(Failing::new(
        403,
        "PERMISSION_DENIED: The caller does not have permission",
    )));

    assert!(matches!(
        workbook.roster(DOC).await,
        Err(SheetsError::Api { status: 403, .. })
    ));
    assert!(matches!(
        workbook.workshop_settings(DOC).await,
        Err(SheetsError::Api { status: 403, .. })
    ));
    assert!(matches!(
        workbook.append_registration(DOC, &registration()).await,
        Err(SheetsError::Api { status: 403, .. })
    ));
}

#[tokio::test]
async fn unknown_spreadsheet_id_is_an_error_not_an_empty_roster() {
    let backend = Arc::new(Failing::new(
        404,
        "NOT_FOUND: Requested entity was not found.",
    ));
    let workbook = Workbook::new(backend.clone());

    assert!(matches!(
        workbook.roster("typo-id").await,
        Err(SheetsError::Api { status: 404, .. })
    ));
    assert!(matches!(
        workbook.workshop_settings("typo-id").await,
        Err(SheetsError::Api { status: 404, .. })
    ));
    assert!(matches!(
        workbook.append_registration("typo-id", &registration()).await,
        Err(SheetsError::Api { status: 404, .. })
    ));
    assert_eq!(backend.added.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unparsable_range_still_falls_back() {
    let backend = Arc::new(Failing::new(
        400,
        "INVALID_ARGUMENT: Unable to parse range: Membri!A2:E",
    ));
    let workbook = Workbook::new(backend);

    assert!(workbook.roster(DOC).await.unwrap().is_empty());
}
