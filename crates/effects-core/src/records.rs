//! Typed records and per-group aggregates.

use std::collections::BTreeMap;

use effects_model::{CanonicalField, CanonicalRow, CellValue, EffectRecord, GroupKey};
use tracing::debug;

use crate::identity::IdentityNormalizer;

/// Converts a canonical row into a typed record.
///
/// Returns `None` when the row has no character id or its star is not a
/// positive whole number. Numeric fields that are blank or non-finite become
/// `None`; nothing is defaulted to zero here.
pub fn coerce_record(row: &CanonicalRow, identity: &IdentityNormalizer) -> Option<EffectRecord> {
    let raw_id = row.get(CanonicalField::CharacterId)?.as_text()?;
    let character_id = identity.normalize(&raw_id);
    if character_id.trim().is_empty() {
        return None;
    }
    let star = row
        .get(CanonicalField::StarRaw)
        .and_then(CellValue::finite_f64)
        .filter(|star| *star >= 1.0 && star.fract() == 0.0 && *star <= f64::from(u32::MAX))?;
    let number = |field| row.get(field).and_then(CellValue::finite_f64);

    Some(EffectRecord {
        character_id,
        star: star as u32,
        feature: row
            .get(CanonicalField::Feature)
            .and_then(CellValue::as_text)
            .unwrap_or_default(),
        coef: number(CanonicalField::Coef),
        ci_low: number(CanonicalField::CiLow),
        ci_high: number(CanonicalField::CiHigh),
        n_support: number(CanonicalField::NSupport),
        n_total: number(CanonicalField::NTotal),
    })
}

/// Maximum `n_total` per group.
///
/// Every group seen in the data has an entry; the value is `None` when none
/// of its records carried a finite `n_total`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupMaxN {
    values: BTreeMap<GroupKey, Option<f64>>,
}

impl GroupMaxN {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EffectRecord>) -> Self {
        let mut values: BTreeMap<GroupKey, Option<f64>> = BTreeMap::new();
        for record in records {
            let slot = values.entry(record.group_key()).or_insert(None);
            if let Some(n_total) = record.n_total {
                *slot = Some(slot.map_or(n_total, |current| current.max(n_total)));
            }
        }
        Self { values }
    }

    /// Known maximum for `key`. Unknown and absent groups both yield `None`.
    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.values.get(key).copied().flatten()
    }

    /// Maximum for `key`, with unknown treated as zero.
    pub fn get_or_zero(&self, key: &GroupKey) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn contains(&self, key: &GroupKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, Option<f64>)> {
        self.values.iter().map(|(key, value)| (key, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Typed records plus the aggregates every layout pass needs.
///
/// Built once per data load. Layout passes only read from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<EffectRecord>,
    group_max_n: GroupMaxN,
    by_group: BTreeMap<GroupKey, Vec<usize>>,
}

impl Dataset {
    pub fn new(records: Vec<EffectRecord>) -> Self {
        let group_max_n = GroupMaxN::from_records(&records);
        let mut by_group: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            by_group.entry(record.group_key()).or_default().push(index);
        }
        debug!(
            records = records.len(),
            groups = by_group.len(),
            "built dataset"
        );
        Self {
            records,
            group_max_n,
            by_group,
        }
    }

    /// Coerces canonical rows, dropping the ones without a usable identity.
    pub fn from_rows(rows: &[CanonicalRow], identity: &IdentityNormalizer) -> Self {
        let records: Vec<EffectRecord> = rows
            .iter()
            .filter_map(|row| coerce_record(row, identity))
            .collect();
        let dropped = rows.len() - records.len();
        if dropped > 0 {
            debug!(dropped, "dropped rows without character id or star");
        }
        Self::new(records)
    }

    pub fn records(&self) -> &[EffectRecord] {
        &self.records
    }

    pub fn group_max_n(&self) -> &GroupMaxN {
        &self.group_max_n
    }

    /// Records of one group, in source order.
    pub fn records_for<'a>(
        &'a self,
        key: &GroupKey,
    ) -> impl Iterator<Item = &'a EffectRecord> + use<'a> {
        self.by_group
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|index| self.records.get(*index))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
