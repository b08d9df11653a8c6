//! Scalar cell values as handed over by spreadsheet or CSV parsers.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Digits grouped in threes by commas, spaces or no-break spaces.
static GROUPED_THOUSANDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}([, \x{a0}]\d{3})+(\.\d+)?$")
        .expect("valid grouped thousands regex")
});

/// A single scalar cell: text, number, or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Builds a cell from raw text, keeping numbers numeric.
    ///
    /// Blank text becomes [`CellValue::Null`].
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        match parse_numeric(trimmed) {
            Some(number) => Self::Number(number),
            None => Self::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell. Text is parsed, empty cells yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(value) => Some(*value),
            Self::Text(text) => parse_numeric(text),
        }
    }

    /// Numeric view restricted to finite values.
    pub fn finite_f64(&self) -> Option<f64> {
        self.as_f64().filter(|value| value.is_finite())
    }

    /// Text view of the cell, trimmed. Empty text yields `None`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Number(value) => Some(format_number(*value)),
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse a string value to `f64`.
///
/// Handles common numeric spellings:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,234,567", "12 500"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
///
/// Separators are only stripped when the digits are grouped in threes, so a
/// decimal comma such as "-0,25" is not a number.
///
/// Returns `None` if the value cannot be parsed as a number.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    let cleaned = if GROUPED_THOUSANDS.is_match(trimmed) {
        trimmed.replace([',', ' ', '\u{a0}'], "")
    } else {
        trimmed.to_string()
    };

    if cleaned.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    if cleaned.eq_ignore_ascii_case("inf") || cleaned.eq_ignore_ascii_case("infinity") {
        return Some(f64::INFINITY);
    }
    if cleaned.eq_ignore_ascii_case("-inf") || cleaned.eq_ignore_ascii_case("-infinity") {
        return Some(f64::NEG_INFINITY);
    }

    cleaned.parse().ok()
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value as i64;
        whole.to_string()
    } else {
        value.to_string()
    }
}
