//! End-to-end ingestion: files on disk to canonical rows.

use std::path::PathBuf;

use effects_ingest::{IngestError, ingest_sheets, read_sheets};
use effects_model::{CanonicalField, CellValue};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn header_match_picks_effect_table_among_exports() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a_readme.csv", "note\nsee other sheet\n");
    write(
        &dir,
        "b_model.csv",
        "Unit ID,Star Level,Item Name,Coefficient,Support,Games,Upper,Lower,p\n\
         TFT15_Ashe,2,Guinsoos Rageblade,-0.21,140,900,-0.1,-0.3,0.01\n\
         TFT15_Ashe,2,Radiant Guinsoos,-0.4,20,900,-0.25,-0.55,0.2\n",
    );

    let sheets = read_sheets(&[dir.path().to_path_buf()]).unwrap();
    let rows = ingest_sheets(&sheets).unwrap();

    assert_eq!(rows.len(), 2);
    let first = &rows[0];
    assert_eq!(
        first.get(CanonicalField::CharacterId),
        Some(&CellValue::Text("TFT15_Ashe".to_string()))
    );
    assert_eq!(first.get(CanonicalField::StarRaw), Some(&CellValue::Number(2.0)));
    assert_eq!(first.get(CanonicalField::Coef), Some(&CellValue::Number(-0.21)));
    assert_eq!(first.get(CanonicalField::NSupport), Some(&CellValue::Number(140.0)));
    assert_eq!(first.get(CanonicalField::NTotal), Some(&CellValue::Number(900.0)));
    assert_eq!(first.get(CanonicalField::CiHigh), Some(&CellValue::Number(-0.1)));
    assert_eq!(first.get(CanonicalField::CiLow), Some(&CellValue::Number(-0.3)));
}

#[test]
fn preferred_name_wins_even_without_required_columns() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "model.csv", "champion,star,item,coef\nTFT15_Ashe,2,x,0.1\n");
    let named = write(&dir, "Effects.csv", "champion,star\nTFT15_Ashe,2\n");

    let sheets = read_sheets(&[good, named]).unwrap();
    let err = ingest_sheets(&sheets).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumns { ref table, .. } if table == "Effects"));
}

#[test]
fn blank_cells_stay_missing_not_zero() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "effects.csv",
        "champion,star,item,coef,n_support\nTFT15_Ashe,2,x,,\n",
    );
    let sheets = read_sheets(&[path]).unwrap();
    let rows = ingest_sheets(&sheets).unwrap();

    assert_eq!(rows[0].get(CanonicalField::Coef), Some(&CellValue::Null));
    assert_eq!(rows[0].get(CanonicalField::Coef).and_then(CellValue::finite_f64), None);
    assert!(!rows[0].has(CanonicalField::NTotal));
}

#[test]
fn decimal_comma_cells_stay_text() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "effects.csv",
        "champion,star,item,coef,n_total\nTFT15_Ashe,2,x,\"-0,25\",\"1,234\"\n",
    );
    let sheets = read_sheets(&[path]).unwrap();
    let rows = ingest_sheets(&sheets).unwrap();

    assert_eq!(
        rows[0].get(CanonicalField::Coef),
        Some(&CellValue::Text("-0,25".to_string()))
    );
    assert_eq!(rows[0].get(CanonicalField::NTotal), Some(&CellValue::Number(1234.0)));
}
