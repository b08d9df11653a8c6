//! Typed effect estimates.

use serde::{Deserialize, Serialize};

use crate::group::GroupKey;

/// One item's regression output for a `(character, star)` group.
///
/// Numeric fields are `Some` only when the source cell held a finite number.
/// Consumers decide which missing fields disqualify a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub character_id: String,
    pub star: u32,
    pub feature: String,
    pub coef: Option<f64>,
    pub ci_low: Option<f64>,
    pub ci_high: Option<f64>,
    pub n_support: Option<f64>,
    pub n_total: Option<f64>,
}

impl EffectRecord {
    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(self.character_id.clone(), self.star)
    }
}
