//! Support gating.
//!
//! Decides whether an item effect has enough supporting samples to be shown.
//! The threshold scales with the group's total sample size between a floor
//! and a cap. Rare items (artifacts, radiants, emblems, crests) get lower
//! thresholds and an extra soft path for clearly directional estimates.

use std::sync::LazyLock;

use effects_model::{EffectRecord, GateThresholds, RareGateThresholds, SupportGateConfig};
use regex::Regex;

static RARE_FEATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(artifact|radiant|emblem|crest)").expect("valid rare feature regex")
});

/// Which threshold set applies to a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateClass {
    Normal,
    Rare,
}

impl GateClass {
    pub fn of(feature: &str) -> Self {
        if RARE_FEATURE.is_match(feature) {
            Self::Rare
        } else {
            Self::Normal
        }
    }
}

/// Outcome of gating one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Support met the hard threshold.
    Hard,
    /// Rare item admitted through the soft path.
    Soft,
    Rejected,
}

impl GateDecision {
    pub fn is_admitted(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// `max(floor, min(floor(n * pct), cap))`.
pub fn hard_threshold(thresholds: &GateThresholds, group_max_n: f64) -> f64 {
    let scaled = (group_max_n * thresholds.pct).floor();
    thresholds.floor.max(scaled.min(thresholds.cap))
}

fn soft_admits(rare: &RareGateThresholds, n_support: f64, ci_high: Option<f64>) -> bool {
    if n_support < rare.soft_min {
        return false;
    }
    let Some(ci_high) = ci_high.filter(|value| value.is_finite()) else {
        return false;
    };
    let positive = rare.soft_ci_high_pos.is_some_and(|limit| ci_high >= limit);
    let negative = rare.soft_ci_high_neg.is_some_and(|limit| ci_high <= limit);
    positive || negative
}

/// Gates a single record against its group's maximum total sample size.
///
/// Pure: the same record, group size and config always give the same
/// decision. A record without a finite `n_support` is rejected.
pub fn evaluate(
    record: &EffectRecord,
    group_max_n: f64,
    config: &SupportGateConfig,
) -> GateDecision {
    let Some(n_support) = record.n_support.filter(|value| value.is_finite()) else {
        return GateDecision::Rejected;
    };
    match GateClass::of(&record.feature) {
        GateClass::Normal => {
            if n_support >= hard_threshold(&config.normal, group_max_n) {
                GateDecision::Hard
            } else {
                GateDecision::Rejected
            }
        }
        GateClass::Rare => {
            let rare = &config.rare;
            if n_support >= hard_threshold(&rare.hard(), group_max_n) {
                GateDecision::Hard
            } else if soft_admits(rare, n_support, record.ci_high) {
                GateDecision::Soft
            } else {
                GateDecision::Rejected
            }
        }
    }
}

pub fn admit(record: &EffectRecord, group_max_n: f64, config: &SupportGateConfig) -> bool {
    evaluate(record, group_max_n, config).is_admitted()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(feature: &str, n_support: Option<f64>, ci_high: Option<f64>) -> EffectRecord {
        EffectRecord {
            character_id: "TFT15_Ashe".to_string(),
            star: 2,
            feature: feature.to_string(),
            coef: Some(-0.1),
            ci_low: None,
            ci_high,
            n_support,
            n_total: None,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(GateClass::of("Radiant Guinsoo's Rageblade"), GateClass::Rare);
        assert_eq!(GateClass::of("Sorcerer EMBLEM"), GateClass::Rare);
        assert_eq!(GateClass::of("crestfallen"), GateClass::Rare);
        assert_eq!(GateClass::of("Infinity Edge"), GateClass::Normal);
    }

    #[test]
    fn test_hard_threshold_bounds() {
        let normal = GateThresholds::default();
        assert_eq!(hard_threshold(&normal, 0.0), 80.0);
        assert_eq!(hard_threshold(&normal, 12_000.0), 120.0);
        assert_eq!(hard_threshold(&normal, 1_000_000.0), 250.0);
        assert_eq!(hard_threshold(&normal, 12_099.0), 120.0);
    }

    #[test]
    fn test_normal_item() {
        let config = SupportGateConfig::default();
        let n = 12_000.0;
        assert_eq!(evaluate(&record("IE", Some(120.0), None), n, &config), GateDecision::Hard);
        assert_eq!(evaluate(&record("IE", Some(119.0), None), n, &config), GateDecision::Rejected);
    }

    #[test]
    fn test_rare_soft_path() {
        let config = SupportGateConfig::default();
        let n = 12_000.0;
        // hard threshold is max(30, min(48, 120)) = 48
        assert_eq!(
            evaluate(&record("Radiant IE", Some(48.0), None), n, &config),
            GateDecision::Hard
        );
        assert_eq!(
            evaluate(&record("Radiant IE", Some(20.0), Some(-0.25)), n, &config),
            GateDecision::Soft
        );
        assert_eq!(
            evaluate(&record("Radiant IE", Some(20.0), Some(-0.1)), n, &config),
            GateDecision::Rejected
        );
        assert_eq!(
            evaluate(&record("Radiant IE", Some(10.0), Some(-0.5)), n, &config),
            GateDecision::Rejected
        );
        assert_eq!(
            evaluate(&record("Radiant IE", Some(20.0), None), n, &config),
            GateDecision::Rejected
        );
    }

    #[test]
    fn test_rare_positive_limit_when_configured() {
        let mut config = SupportGateConfig::default();
        config.rare.soft_ci_high_pos = Some(0.15);
        let decision = evaluate(&record("Tank Crest", Some(16.0), Some(0.2)), 0.0, &config);
        assert_eq!(decision, GateDecision::Soft);
    }

    #[test]
    fn test_missing_support_rejected() {
        let config = SupportGateConfig::default();
        assert!(!admit(&record("IE", None, None), 0.0, &config));
        assert!(!admit(&record("IE", Some(f64::NAN), None), 0.0, &config));
    }
}
