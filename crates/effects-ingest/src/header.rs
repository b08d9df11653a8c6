//! Header canonicalization.
//!
//! Source tables name their columns in many ways ("Champion", "unit_id",
//! "Coefficient", "upper_ci", ...). Each header is reduced to lowercase
//! alphanumerics and looked up in a fixed alias table; columns that match no
//! alias are dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use effects_model::{CanonicalField, CanonicalRow, RawRow};

/// Aliases per canonical field, in lookup priority order.
const ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::CharacterId,
        &[
            "character_id",
            "characterid",
            "champion",
            "champion_id",
            "championid",
            "unit_id",
            "unitid",
            "char_id",
            "charid",
            "name",
        ],
    ),
    (
        CanonicalField::StarRaw,
        &[
            "star_raw",
            "star",
            "stars",
            "starlevel",
            "level",
            "starnum",
            "star_num",
        ],
    ),
    (
        CanonicalField::Feature,
        &[
            "feature",
            "item",
            "item_name",
            "itemname",
            "item_feature",
            "feat",
            "itemfeature",
        ],
    ),
    (
        CanonicalField::Coef,
        &[
            "coef",
            "coefficient",
            "coef_mean",
            "coefmean",
            "effect",
            "beta",
            "point_coef",
        ],
    ),
    (
        CanonicalField::NSupport,
        &[
            "n_support",
            "support",
            "support_n",
            "count",
            "freq",
            "frequency",
        ],
    ),
    (
        CanonicalField::NTotal,
        &[
            "n_total",
            "total",
            "n",
            "games",
            "matches",
            "sample",
            "samples",
            "sample_size",
            "observations",
            "obs",
            "n_obs",
            "records",
        ],
    ),
    (
        CanonicalField::CiHigh,
        &["ci_high", "cihi", "upper", "upper_ci", "ci_upper", "high", "ub"],
    ),
    (
        CanonicalField::CiLow,
        &["ci_low", "cilo", "lower", "lower_ci", "ci_lower", "low", "lb"],
    ),
];

/// Normalized alias -> field. The first field to claim an alias keeps it.
static ALIAS_LOOKUP: LazyLock<HashMap<String, CanonicalField>> = LazyLock::new(|| {
    let mut lookup = HashMap::new();
    for (field, aliases) in ALIASES {
        for alias in std::iter::once(&field.as_str()).chain(aliases.iter()) {
            lookup.entry(normalize_key(alias)).or_insert(*field);
        }
    }
    lookup
});

/// Lowercases a header and strips everything but ASCII letters and digits.
pub fn normalize_key(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Resolves a source header to its canonical field, if any alias matches.
pub fn canonical_field(header: &str) -> Option<CanonicalField> {
    ALIAS_LOOKUP.get(&normalize_key(header)).copied()
}

/// Maps one raw row onto the canonical field set.
///
/// Unrecognized columns are dropped. When several columns resolve to the same
/// field, the last one wins. Never fails; a row may come out empty.
pub fn canonicalize_row(row: &RawRow) -> CanonicalRow {
    let mut out = CanonicalRow::default();
    for (key, value) in row.iter() {
        if let Some(field) = canonical_field(key) {
            out.set(field, value.clone());
        }
    }
    out
}

/// Canonical fields a header list resolves to, without any row data.
pub fn canonical_fields<'a, I>(headers: I) -> Vec<CanonicalField>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields: Vec<CanonicalField> = headers.into_iter().filter_map(canonical_field).collect();
    fields.sort();
    fields.dedup();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use effects_model::CellValue;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Champion ID"), "championid");
        assert_eq!(normalize_key("\u{feff}ci_high"), "cihigh");
        assert_eq!(normalize_key("N"), "n");
    }

    #[test]
    fn test_canonical_field_aliases() {
        assert_eq!(canonical_field("Champion"), Some(CanonicalField::CharacterId));
        assert_eq!(canonical_field("Star Level"), Some(CanonicalField::StarRaw));
        assert_eq!(canonical_field("ITEM_NAME"), Some(CanonicalField::Feature));
        assert_eq!(canonical_field("Coefficient"), Some(CanonicalField::Coef));
        assert_eq!(canonical_field("support-n"), Some(CanonicalField::NSupport));
        assert_eq!(canonical_field("N"), Some(CanonicalField::NTotal));
        assert_eq!(canonical_field("Upper CI"), Some(CanonicalField::CiHigh));
        assert_eq!(canonical_field("lb"), Some(CanonicalField::CiLow));
        assert_eq!(canonical_field("p_value"), None);
    }

    #[test]
    fn test_canonicalize_row_drops_unknown() {
        let row = RawRow::from_pairs([
            ("Champion", CellValue::from("TFT15_Ashe")),
            ("star", CellValue::Number(2.0)),
            ("p_value", CellValue::Number(0.01)),
        ]);
        let canon = canonicalize_row(&row);
        assert_eq!(
            canon.fields().collect::<Vec<_>>(),
            vec![CanonicalField::CharacterId, CanonicalField::StarRaw]
        );
    }

    #[test]
    fn test_canonicalize_row_last_duplicate_wins() {
        let row = RawRow::from_pairs([("coef", 0.1), ("beta", 0.2)]);
        let canon = canonicalize_row(&row);
        assert_eq!(canon.get(CanonicalField::Coef), Some(&CellValue::Number(0.2)));
    }

    #[test]
    fn test_empty_row_is_valid() {
        let row = RawRow::from_pairs([("unrelated", 1.0)]);
        assert!(canonicalize_row(&row).is_empty());
    }
}
