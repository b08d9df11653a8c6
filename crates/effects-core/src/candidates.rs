//! Candidate enumeration.
//!
//! A candidate is a `(character, star)` group the user may select as an
//! overview row. Groups qualify when their character is not banned, their
//! total sample size is known and large enough, and their star matches the
//! star level the character's cost makes relevant.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use effects_model::{Candidate, GroupKey};
use tracing::debug;

use crate::identity::{DEFAULT_SET_PREFIX, IdentityNormalizer, display_name};
use crate::records::GroupMaxN;

/// Characters excluded from selection unless a host overrides the list.
pub const DEFAULT_BANNED_IDS: &[&str] = &["tft15_galio", "tft15_ekko"];

/// Case-insensitive set of banned character ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanSet {
    ids: HashSet<String>,
}

impl Default for BanSet {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_IDS.iter().copied())
    }
}

impl BanSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids.into_iter().map(|id| id.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }

    pub fn contains(&self, character_id: &str) -> bool {
        self.ids.contains(&character_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Character costs, looked up by canonical id and then by display name.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    by_id: HashMap<String, f64>,
    by_name: HashMap<String, f64>,
}

impl CostTable {
    /// Builds a table from raw `(id, cost)` pairs.
    ///
    /// Bare names such as `Ashe` get [`DEFAULT_SET_PREFIX`] before
    /// normalization. Later entries overwrite earlier ones.
    pub fn from_entries<I, S>(entries: I, identity: &IdentityNormalizer) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (raw_id, cost) in entries {
            table.insert(raw_id.as_ref(), cost, identity);
        }
        debug!(entries = table.by_id.len(), "built cost table");
        table
    }

    pub fn insert(&mut self, raw_id: &str, cost: f64, identity: &IdentityNormalizer) {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() || !cost.is_finite() {
            return;
        }
        let prefixed = if raw_id.contains('_') {
            raw_id.to_string()
        } else {
            format!("{DEFAULT_SET_PREFIX}{raw_id}")
        };
        let id = identity.normalize(&prefixed);
        let name = display_name(&id).to_lowercase();
        self.by_name.insert(name, cost);
        self.by_id.insert(id, cost);
    }

    /// Cost of a canonical character id, if known.
    pub fn cost_of(&self, character_id: &str) -> Option<f64> {
        self.by_id
            .get(character_id)
            .or_else(|| self.by_name.get(&display_name(character_id).to_lowercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Star level shown for a character of the given cost.
///
/// Cheap characters are commonly upgraded to three stars; expensive ones
/// rarely go past two.
pub fn eligible_star(cost: f64) -> u32 {
    if cost <= 3.0 { 3 } else { 2 }
}

/// Display label such as `"KaiSa ★2"`.
pub fn candidate_label(key: &GroupKey) -> String {
    format!("{} ★{}", display_name(key.character_id()), key.star())
}

fn compare_labels(a: &Candidate, b: &Candidate) -> Ordering {
    a.label
        .to_lowercase()
        .cmp(&b.label.to_lowercase())
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.key.cmp(&b.key))
}

/// Lists the selectable groups, sorted by label.
///
/// A group qualifies when its character is not banned, its maximum total
/// sample size is known and strictly greater than `min_total_n`, and, when
/// the character has a known cost, its star equals [`eligible_star`].
/// Characters without a cost entry keep every star.
pub fn enumerate_candidates(
    group_max_n: &GroupMaxN,
    bans: &BanSet,
    costs: &CostTable,
    min_total_n: f64,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = group_max_n
        .iter()
        .filter(|(key, _)| !bans.contains(key.character_id()))
        .filter(|(_, max_n)| max_n.is_some_and(|n| n > min_total_n))
        .filter(|(key, _)| {
            costs
                .cost_of(key.character_id())
                .is_none_or(|cost| key.star() == eligible_star(cost))
        })
        .map(|(key, _)| Candidate {
            id: key.character_id().to_string(),
            star: key.star(),
            key: key.clone(),
            label: candidate_label(key),
        })
        .collect();
    candidates.sort_by(compare_labels);
    debug!(
        groups = group_max_n.len(),
        candidates = candidates.len(),
        "enumerated candidates"
    );
    candidates
}
