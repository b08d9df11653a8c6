//! Sheet selection.
//!
//! A workbook (or a folder of CSV exports) may hold several tables. The effect
//! table is picked by name when one of the preferred names is present, and
//! otherwise by sniffing which table's headers cover the required fields.

use effects_model::{CanonicalField, CanonicalRow, RawRow};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::header::{canonical_fields, canonicalize_row};

/// Table names that are taken as the effect table outright (case-insensitive).
pub const PREFERRED_SHEET_NAMES: &[&str] = &[
    "effects_all",
    "effects",
    "items_effects",
    "tft_items_effects",
];

/// A named table of raw rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    /// Column names in source order.
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Builds a sheet from rows alone; headers are taken from the first row.
    pub fn from_rows(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        let headers = rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self::new(name, headers, rows)
    }

    /// True when the sheet's header row resolves every required field.
    pub fn has_required_fields(&self) -> bool {
        let fields = canonical_fields(self.headers.iter().map(String::as_str));
        CanonicalField::REQUIRED
            .iter()
            .all(|field| fields.contains(field))
    }
}

/// Picks the effect table among several candidates.
///
/// Order of preference: a preferred name, then the first sheet whose headers
/// cover the required fields, then the first sheet. Returns `None` only for an
/// empty slice.
pub fn select_sheet(sheets: &[Sheet]) -> Option<&Sheet> {
    if let Some(sheet) = sheets.iter().find(|sheet| {
        let lower = sheet.name.to_lowercase();
        PREFERRED_SHEET_NAMES.contains(&lower.as_str())
    }) {
        debug!(sheet = %sheet.name, "selected sheet by name");
        return Some(sheet);
    }

    if let Some(sheet) = sheets
        .iter()
        .find(|sheet| !sheet.headers.is_empty() && sheet.has_required_fields())
    {
        debug!(sheet = %sheet.name, "selected sheet by header match");
        return Some(sheet);
    }

    let fallback = sheets.first();
    if let Some(sheet) = fallback {
        debug!(sheet = %sheet.name, "no sheet matched, falling back to first");
    }
    fallback
}

/// Canonicalizes every row of a sheet.
///
/// Fails when the sheet has rows but its first row lacks a required field, so
/// a half-matching table is never passed on.
pub fn canonicalize_sheet(sheet: &Sheet) -> Result<Vec<CanonicalRow>> {
    let rows: Vec<CanonicalRow> = sheet.rows.iter().map(canonicalize_row).collect();
    if let Some(first) = rows.first() {
        let missing = first.missing_required();
        if !missing.is_empty() {
            warn!(
                sheet = %sheet.name,
                missing = ?missing,
                "effect table is missing required columns"
            );
            return Err(IngestError::MissingColumns {
                table: sheet.name.clone(),
                missing: missing.iter().map(ToString::to_string).collect(),
            });
        }
    }
    debug!(sheet = %sheet.name, rows = rows.len(), "canonicalized sheet");
    Ok(rows)
}

/// Selects the effect table and canonicalizes it.
pub fn ingest_sheets(sheets: &[Sheet]) -> Result<Vec<CanonicalRow>> {
    let sheet = select_sheet(sheets).ok_or(IngestError::NoTables)?;
    canonicalize_sheet(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use effects_model::CellValue;

    fn sheet(name: &str, headers: &[&str]) -> Sheet {
        let row = RawRow::from_pairs(headers.iter().map(|h| (*h, CellValue::from("x"))));
        Sheet::from_rows(name, vec![row])
    }

    #[test]
    fn test_select_by_preferred_name() {
        let sheets = vec![
            sheet("Summary", &["champion", "star", "item", "coef"]),
            sheet("Effects", &["whatever"]),
        ];
        assert_eq!(select_sheet(&sheets).unwrap().name, "Effects");
    }

    #[test]
    fn test_select_by_header_match() {
        let sheets = vec![
            sheet("notes", &["text"]),
            sheet("partial", &["champion", "star"]),
            sheet("model_out", &["Champion", "Star", "Item", "Coefficient"]),
        ];
        assert_eq!(select_sheet(&sheets).unwrap().name, "model_out");
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let sheets = vec![sheet("a", &["x"]), sheet("b", &["y"])];
        assert_eq!(select_sheet(&sheets).unwrap().name, "a");
        assert!(select_sheet(&[]).is_none());
    }

    #[test]
    fn test_canonicalize_sheet_missing_columns() {
        let err = canonicalize_sheet(&sheet("effects", &["champion", "star"])).unwrap_err();
        match err {
            IngestError::MissingColumns { table, missing } => {
                assert_eq!(table, "effects");
                assert_eq!(missing, vec!["feature", "coef"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_canonicalize_empty_sheet() {
        let empty = Sheet::new("effects", vec!["coef".to_string()], Vec::new());
        assert!(canonicalize_sheet(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_ingest_no_tables() {
        assert!(matches!(ingest_sheets(&[]), Err(IngestError::NoTables)));
    }
}
