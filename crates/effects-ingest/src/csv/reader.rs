//! CSV sheet loading.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use effects_model::{CellValue, RawRow};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::sheet::Sheet;

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Reads CSV data into a sheet.
///
/// The first record is the header row. Rows may be shorter or longer than the
/// header; missing cells are empty and extra cells are ignored. Fully blank
/// rows are skipped.
pub fn read_csv_sheet<R: Read>(name: &str, source: R) -> std::result::Result<Sheet, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("");
            row.push(header.clone(), CellValue::from_text(value));
        }
        rows.push(row);
    }

    Ok(Sheet::new(name, headers, rows))
}

/// Reads one CSV file as a sheet named after the file stem.
pub fn read_csv_file(path: &Path) -> Result<Sheet> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .to_string();
    let sheet = read_csv_sheet(&name, file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        sheet = %sheet.name,
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "read csv sheet"
    );
    Ok(sheet)
}

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Reads every given path as sheets; directories expand to their CSV files.
pub fn read_sheets(paths: &[PathBuf]) -> Result<Vec<Sheet>> {
    let mut sheets = Vec::new();
    for path in paths {
        if path.is_dir() {
            for file in list_csv_files(path)? {
                sheets.push(read_csv_file(&file)?);
            }
        } else {
            sheets.push(read_csv_file(path)?);
        }
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_csv_sheet_typed_cells() {
        let data = "\u{feff}Champion,Star,Item,Coef\n\
                    TFT15_Ashe,2,Infinity Edge,-0.12\n\
                    ,,,\n\
                    TFT15_Ashe,2,Bloodthirster\n";
        let sheet = read_csv_sheet("effects", data.as_bytes()).unwrap();

        assert_eq!(sheet.headers, vec!["Champion", "Star", "Item", "Coef"]);
        assert_eq!(sheet.rows.len(), 2);

        let first: Vec<_> = sheet.rows[0].iter().map(|(_, v)| v.clone()).collect();
        assert_eq!(first[1], CellValue::Number(2.0));
        assert_eq!(first[2], CellValue::Text("Infinity Edge".to_string()));
        assert_eq!(first[3], CellValue::Number(-0.12));

        // Short row is padded with empty cells.
        let second: Vec<_> = sheet.rows[1].iter().map(|(_, v)| v.clone()).collect();
        assert_eq!(second[3], CellValue::Null);
    }

    #[test]
    fn test_list_and_read_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b_effects.csv"), "coef\n0.1\n").unwrap();
        std::fs::write(dir.path().join("a_notes.CSV"), "note\nhello\n").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

        let files = list_csv_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);

        let sheets = read_sheets(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a_notes", "b_effects"]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileRead { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let err = list_csv_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
