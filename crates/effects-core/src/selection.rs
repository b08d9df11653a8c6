//! Initial overview selection.

use std::collections::HashSet;

use effects_model::{Candidate, GroupKey, Target};
use tracing::debug;

/// Number of overview rows selected on first load.
pub const SLOT_COUNT: usize = 4;

/// Targets used when the config names none.
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new("TFT15_Ashe", vec![2]),
        Target::new("TFT15_KaiSa", vec![3]),
        Target::new("TFT15_Yuumi", vec![2]),
        Target::new("TFT15_Leona", vec![2]),
        Target::new("TFT15_Yuumi", vec![2]),
    ]
}

/// Picks the first `slot_count` rows from the targets.
///
/// Targets expand to one key per star, in order. A key that is not among
/// the candidates is replaced by the first candidate not already used, or by
/// the first candidate when all are used. With no candidates at all, the
/// unmatched slots are dropped. Duplicate targets stay duplicated.
pub fn initial_selection(
    targets: Option<&[Target]>,
    candidates: &[Candidate],
    slot_count: usize,
) -> Vec<GroupKey> {
    let defaults;
    let targets = match targets {
        Some(targets) => targets,
        None => {
            defaults = default_targets();
            defaults.as_slice()
        }
    };
    let is_candidate = |key: &GroupKey| candidates.iter().any(|candidate| &candidate.key == key);

    let slots: Vec<Option<GroupKey>> = targets
        .iter()
        .flat_map(|target| {
            target
                .stars
                .iter()
                .map(|star| GroupKey::new(target.id.clone(), *star))
        })
        .take(slot_count)
        .map(|key| is_candidate(&key).then_some(key))
        .collect();

    let mut used: HashSet<GroupKey> = slots.iter().flatten().cloned().collect();
    let mut selection = Vec::with_capacity(slots.len());
    for slot in slots {
        let key = match slot {
            Some(key) => key,
            None => {
                let Some(fallback) = candidates
                    .iter()
                    .find(|candidate| !used.contains(&candidate.key))
                    .or_else(|| candidates.first())
                else {
                    continue;
                };
                fallback.key.clone()
            }
        };
        used.insert(key.clone());
        selection.push(key);
    }
    debug!(rows = selection.len(), "initial selection");
    selection
}
