//! Raw and canonical row shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// One source row: arbitrary column names mapped to scalar cells.
///
/// Column order is preserved so that later duplicates of the same canonical
/// field win, matching the order the source table lists them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: CellValue) {
        self.cells.push((key.into(), value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The fixed set of fields every source table is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    CharacterId,
    StarRaw,
    Feature,
    Coef,
    NSupport,
    NTotal,
    CiHigh,
    CiLow,
}

impl CanonicalField {
    /// All fields, in alias-table priority order.
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::CharacterId,
        CanonicalField::StarRaw,
        CanonicalField::Feature,
        CanonicalField::Coef,
        CanonicalField::NSupport,
        CanonicalField::NTotal,
        CanonicalField::CiHigh,
        CanonicalField::CiLow,
    ];

    /// Fields a table must carry to be usable at all.
    pub const REQUIRED: [CanonicalField; 4] = [
        CanonicalField::CharacterId,
        CanonicalField::StarRaw,
        CanonicalField::Feature,
        CanonicalField::Coef,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CharacterId => "character_id",
            Self::StarRaw => "star_raw",
            Self::Feature => "feature",
            Self::Coef => "coef",
            Self::NSupport => "n_support",
            Self::NTotal => "n_total",
            Self::CiHigh => "ci_high",
            Self::CiLow => "ci_low",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row restricted to the canonical fields.
///
/// Fields missing from the source stay `None`; nothing is defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_raw: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coef: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_support: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_total: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_high: Option<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_low: Option<CellValue>,
}

impl CanonicalRow {
    pub fn get(&self, field: CanonicalField) -> Option<&CellValue> {
        self.slot(field).as_ref()
    }

    pub fn set(&mut self, field: CanonicalField, value: CellValue) {
        *self.slot_mut(field) = Some(value);
    }

    /// True when the field was present in the source, even if its cell is empty.
    pub fn has(&self, field: CanonicalField) -> bool {
        self.slot(field).is_some()
    }

    /// Required fields absent from this row.
    pub fn missing_required(&self) -> Vec<CanonicalField> {
        CanonicalField::REQUIRED
            .into_iter()
            .filter(|field| !self.has(*field))
            .collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| self.has(*field))
    }

    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    fn slot(&self, field: CanonicalField) -> &Option<CellValue> {
        match field {
            CanonicalField::CharacterId => &self.character_id,
            CanonicalField::StarRaw => &self.star_raw,
            CanonicalField::Feature => &self.feature,
            CanonicalField::Coef => &self.coef,
            CanonicalField::NSupport => &self.n_support,
            CanonicalField::NTotal => &self.n_total,
            CanonicalField::CiHigh => &self.ci_high,
            CanonicalField::CiLow => &self.ci_low,
        }
    }

    fn slot_mut(&mut self, field: CanonicalField) -> &mut Option<CellValue> {
        match field {
            CanonicalField::CharacterId => &mut self.character_id,
            CanonicalField::StarRaw => &mut self.star_raw,
            CanonicalField::Feature => &mut self.feature,
            CanonicalField::Coef => &mut self.coef,
            CanonicalField::NSupport => &mut self.n_support,
            CanonicalField::NTotal => &mut self.n_total,
            CanonicalField::CiHigh => &mut self.ci_high,
            CanonicalField::CiLow => &mut self.ci_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required() {
        let mut row = CanonicalRow::default();
        row.set(CanonicalField::CharacterId, "TFT15_Ashe".into());
        row.set(CanonicalField::Coef, CellValue::Null);
        assert_eq!(
            row.missing_required(),
            vec![CanonicalField::StarRaw, CanonicalField::Feature]
        );
    }

    #[test]
    fn test_empty_row() {
        let row = CanonicalRow::default();
        assert!(row.is_empty());
        assert_eq!(row.get(CanonicalField::Coef), None);
    }

    #[test]
    fn test_raw_row_keeps_order() {
        let row = RawRow::from_pairs([("b", 1.0), ("a", 2.0)]);
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
