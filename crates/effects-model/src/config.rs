//! Session configuration.
//!
//! Every struct here deserializes with `#[serde(default)]`, so a partial JSON
//! document only overrides the keys it names and everything else keeps the
//! built-in defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PATCH_LABEL: &str = "Patch";
pub const DEFAULT_MIN_TOTAL_N: f64 = 500.0;

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Label shown next to both plots.
    pub patch_label: String,
    /// Preferred initial rows; `None` uses the built-in target list.
    pub targets: Option<Vec<Target>>,
    /// A group must have strictly more total samples than this to be selectable.
    pub min_total_n: f64,
    pub support_gates: SupportGateConfig,
    pub detail_plot: DetailPlotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            patch_label: DEFAULT_PATCH_LABEL.to_string(),
            targets: None,
            min_total_n: DEFAULT_MIN_TOTAL_N,
            support_gates: SupportGateConfig::default(),
            detail_plot: DetailPlotConfig::default(),
        }
    }
}

/// A character and the star levels to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    #[serde(default)]
    pub stars: Vec<u32>,
}

impl Target {
    pub fn new(id: impl Into<String>, stars: Vec<u32>) -> Self {
        Self {
            id: id.into(),
            stars,
        }
    }
}

/// Sample-size thresholds for both item classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportGateConfig {
    pub normal: GateThresholds,
    pub rare: RareGateThresholds,
}

/// Hard threshold parameters: `max(floor, min(floor(N * pct), cap))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateThresholds {
    pub floor: f64,
    pub pct: f64,
    pub cap: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            floor: 80.0,
            pct: 0.01,
            cap: 250.0,
        }
    }
}

/// Thresholds for rare items, with an optional soft admission path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RareGateThresholds {
    pub floor: f64,
    pub pct: f64,
    pub cap: f64,
    /// Minimum support for the soft path.
    pub soft_min: f64,
    /// Soft-admit when `ci_high` is at or above this value. Unset by default.
    #[serde(rename = "soft_ci_high", alias = "soft_ci_high_pos")]
    pub soft_ci_high_pos: Option<f64>,
    /// Soft-admit when `ci_high` is at or below this value.
    pub soft_ci_high_neg: Option<f64>,
}

impl RareGateThresholds {
    pub fn hard(&self) -> GateThresholds {
        GateThresholds {
            floor: self.floor,
            pct: self.pct,
            cap: self.cap,
        }
    }
}

impl Default for RareGateThresholds {
    fn default() -> Self {
        Self {
            floor: 30.0,
            pct: 0.004,
            cap: 120.0,
            soft_min: 15.0,
            soft_ci_high_pos: None,
            soft_ci_high_neg: Some(-0.2),
        }
    }
}

/// Domain of the forest plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailPlotConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub clamp: ClampConfig,
}

impl Default for DetailPlotConfig {
    fn default() -> Self {
        Self {
            x_min: -0.5,
            x_max: 0.5,
            clamp: ClampConfig::default(),
        }
    }
}

/// Which domain edges clip out-of-range values.
///
/// The layout engines always clamp; these flags are kept so hosts can mark
/// clipped edges in their rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClampConfig {
    pub left: bool,
    pub right: bool,
}

impl Default for ClampConfig {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.patch_label, "Patch");
        assert_eq!(config.min_total_n, 500.0);
        assert_eq!(config.support_gates.normal.floor, 80.0);
        assert_eq!(config.support_gates.rare.soft_ci_high_pos, None);
        assert_eq!(config.support_gates.rare.soft_ci_high_neg, Some(-0.2));
        assert_eq!(config.detail_plot.x_max, 0.5);
    }

    #[test]
    fn test_rare_hard_view() {
        let rare = RareGateThresholds::default();
        assert_eq!(
            rare.hard(),
            GateThresholds {
                floor: 30.0,
                pct: 0.004,
                cap: 120.0
            }
        );
    }
}
