//! Character cost tables.
//!
//! A small delimited file mapping character ids (or bare names) to their shop
//! cost. The delimiter is sniffed from the header line; comma, semicolon and
//! tab are accepted.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

const ID_HEADERS: &[&str] = &["id", "champion_id", "character_id", "name"];
const COST_HEADERS: &[&str] = &["cost", "price"];

/// One row of a cost table, id not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEntry {
    pub raw_id: String,
    pub cost: f64,
}

fn sniff_delimiter(header_line: &str) -> u8 {
    [b',', b';', b'\t']
        .into_iter()
        .max_by_key(|delim| header_line.bytes().filter(|b| b == delim).count())
        .filter(|delim| header_line.as_bytes().contains(delim))
        .unwrap_or(b',')
}

/// Parses cost table text.
///
/// Returns an empty list when the id or cost column cannot be found. Rows
/// with an empty id or a non-numeric cost are skipped.
pub fn parse_cost_table(text: &str) -> Vec<CostEntry> {
    let Some(header_line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return Vec::new();
    };
    let delimiter = sniff_delimiter(header_line);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim_start().as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers
            .iter()
            .map(|h| h.trim_matches('\u{feff}').to_lowercase())
            .collect(),
        Err(error) => {
            warn!(%error, "unreadable cost table header");
            return Vec::new();
        }
    };
    let id_col = headers.iter().position(|h| ID_HEADERS.contains(&h.as_str()));
    let cost_col = headers.iter().position(|h| COST_HEADERS.contains(&h.as_str()));
    let (Some(id_col), Some(cost_col)) = (id_col, cost_col) else {
        warn!(headers = ?headers, "cost table lacks id or cost column");
        return Vec::new();
    };

    let mut entries = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        let raw_id = record.get(id_col).unwrap_or("").trim();
        let cost = record
            .get(cost_col)
            .and_then(effects_model::parse_numeric)
            .filter(|cost| cost.is_finite());
        match cost {
            Some(cost) if !raw_id.is_empty() => entries.push(CostEntry {
                raw_id: raw_id.to_string(),
                cost,
            }),
            _ => {}
        }
    }
    debug!(entries = entries.len(), "parsed cost table");
    entries
}

/// Reads and parses a cost table file.
pub fn load_cost_table(path: &Path) -> Result<Vec<CostEntry>> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_cost_table(&text))
}
