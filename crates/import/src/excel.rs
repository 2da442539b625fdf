use crate::error::ImportError;
use crate::rows::import_rows;
use calamine::{Data, Reader, open_workbook_auto};
use cardpress_model::CardDeck;
use std::path::Path;

/// Text form of a cell. Whole-number floats drop their fractional part so
/// a phone number stored as `5551234.0` imports as `5551234`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}

/// Reads every row of the first worksheet as text.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<String>>, ImportError> {
    let unreadable = |message: String| ImportError::UnreadableFile {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable("workbook has no worksheets".into()))?
        .map_err(|e| unreadable(e.to_string()))?;

    Ok(range.rows().map(|row| row.iter().map(cell_text).collect()).collect())
}

/// Builds a deck from the spreadsheet at `path`.
pub fn import_workbook(path: &Path) -> Result<CardDeck, ImportError> {
    let rows = read_first_sheet(path)?;
    let deck = import_rows(rows)?;
    log::info!(
        "Imported {} cards with {} fields from {}",
        deck.records.len(),
        deck.template.len(),
        path.display()
    );
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_stringified_without_trailing_zero() {
        assert_eq!(cell_text(&Data::Float(5551234.0)), "5551234");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = import_workbook(Path::new("/no/such/workbook.xlsx")).unwrap_err();
        assert!(matches!(err, ImportError::UnreadableFile { .. }));
    }

    #[test]
    fn non_spreadsheet_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();
        let err = import_workbook(&path).unwrap_err();
        assert!(matches!(err, ImportError::UnreadableFile { .. }));
    }
}
