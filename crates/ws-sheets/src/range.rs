//! A1 notation helpers.

use crate::error::SheetsError;

/// `'Sheet name'!A2:E`, quoting the tab name the way the Sheets API expects.
#[must_use]
pub fn qualified(sheet: &str, cells: &str) -> String {
    format!("'{}'!{cells}", sheet.replace('\'', "''"))
}

/// A parsed `Sheet!A2:E` range. Columns are 0-based, rows 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start_col: usize,
    pub start_row: Option<usize>,
    pub end_col: Option<usize>,
    pub end_row: Option<usize>,
}

impl A1Range {
    /// Parse a sheet-qualified range such as `'Membri'!A2:E` or `Config!A:B`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Parse`] when the range has no sheet part or a
    /// cell reference is malformed.
    pub fn parse(range: &str) -> Result<Self, SheetsError> {
        let (sheet, cells) = range
            .rsplit_once('!')
            .ok_or_else(|| SheetsError::Parse(format!("range '{range}' has no sheet name")))?;

        let sheet = sheet
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .map_or_else(|| sheet.to_string(), |s| s.replace("''", "'"));

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (start, Some(end)),
            None => (cells, None),
        };

        let (start_col, start_row) = parse_cell(start, range)?;
        let (end_col, end_row) = match end {
            Some(end) => {
                let (col, row) = parse_cell(end, range)?;
                (Some(col), row)
            }
            None => (Some(start_col), start_row),
        };

        Ok(Self {
            sheet,
            start_col,
            start_row,
            end_col,
            end_row,
        })
    }
}

fn parse_cell(cell: &str, range: &str) -> Result<(usize, Option<usize>), SheetsError> {
    let invalid = || SheetsError::Parse(format!("invalid cell reference '{cell}' in '{range}'"));

    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    let col = letters
        .chars()
        .fold(0usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1))
        - 1;

    let row = if digits.is_empty() {
        None
    } else {
        match digits.parse::<usize>() {
            Ok(row) if row > 0 => Some(row),
            _ => return Err(invalid()),
        }
    };

    Ok((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn qualifies_and_escapes_names() {
        assert_eq!(qualified("Membri", "A2:E"), "'Membri'!A2:E");
        assert_eq!(qualified("Ion's", "A:B"), "'Ion''s'!A:B");
    }

    #[test]
    fn parses_quoted_range_with_spaces() {
        let range = A1Range::parse("'Configurare Workshop'!A:B").unwrap();
        assert_eq!(
            range,
            A1Range {
                sheet: "Configurare Workshop".into(),
                start_col: 0,
                start_row: None,
                end_col: Some(1),
                end_row: None,
            }
        );
    }

    #[test]
    fn parses_rows_and_wide_columns() {
        let range = A1Range::parse("Înscrieri!A1:AO10").unwrap();
        assert_eq!(range.sheet, "Înscrieri");
        assert_eq!(range.start_row, Some(1));
        assert_eq!(range.end_col, Some(40));
        assert_eq!(range.end_row, Some(10));
    }

    #[test]
    fn round_trips_escaped_quote() {
        let range = A1Range::parse(&qualified("Ion's", "A2:E")).unwrap();
        assert_eq!(range.sheet, "Ion's");
        assert_eq!(range.start_row, Some(2));
    }

    #[test]
    fn rejects_missing_sheet_and_bad_cells() {
        assert!(A1Range::parse("A1:B2").is_err());
        assert!(A1Range::parse("Sheet!1A").is_err());
        assert!(A1Range::parse("Sheet!A0").is_err());
    }
}
