//! Effect table ingestion utilities.
//!
//! This crate turns files on disk into the canonical rows the layout core
//! works on.
//!
//! # Features
//!
//! - **Header canonicalization**: map arbitrary column names onto the fixed field set
//! - **Sheet selection**: pick the effect table among several candidates
//! - **CSV loading**: read CSV exports as sheets of typed cells
//! - **Cost tables**: parse character cost lists with a sniffed delimiter
//! - **Config**: load the JSON session config with defaults for omitted keys
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use effects_ingest::{ingest_sheets, read_sheets};
//!
//! let sheets = read_sheets(&[PathBuf::from("data/")])?;
//! let rows = ingest_sheets(&sheets)?;
//! ```

mod config;
mod cost;
mod csv;
mod error;
mod header;
mod sheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Header Canonicalization ===
pub use header::{canonical_field, canonical_fields, canonicalize_row, normalize_key};

// === Sheet Selection ===
pub use sheet::{PREFERRED_SHEET_NAMES, Sheet, canonicalize_sheet, ingest_sheets, select_sheet};

// === CSV Reading ===
pub use self::csv::{list_csv_files, read_csv_file, read_csv_sheet, read_sheets};

// === Cost Tables ===
pub use cost::{CostEntry, load_cost_table, parse_cost_table};

// === Config ===
pub use config::load_config;
