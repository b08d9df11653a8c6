//! Whole-pass entry points.
//!
//! Every call recomputes its outputs from scratch. Nothing is cached between
//! calls, so the same inputs always produce identical layouts.

use effects_model::{AppConfig, Candidate, DetailLayout, GroupKey, OverviewLayout};
use tracing::info_span;

use crate::candidates::{BanSet, CostTable, enumerate_candidates};
use crate::detail::{DetailGeometry, layout_detail};
use crate::overview::{OverviewGeometry, layout_overview};
use crate::records::Dataset;

/// Plots are never laid out narrower than this.
pub const MIN_VIEWPORT_WIDTH: u32 = 600;

/// Widths available to the two plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    overview_width: u32,
    detail_width: u32,
}

impl Viewport {
    /// Widths below [`MIN_VIEWPORT_WIDTH`] are raised to it.
    pub fn new(overview_width: u32, detail_width: u32) -> Self {
        Self {
            overview_width: overview_width.max(MIN_VIEWPORT_WIDTH),
            detail_width: detail_width.max(MIN_VIEWPORT_WIDTH),
        }
    }

    /// Both plots share one width.
    pub fn uniform(width: u32) -> Self {
        Self::new(width, width)
    }

    pub fn overview_width(&self) -> u32 {
        self.overview_width
    }

    pub fn detail_width(&self) -> u32 {
        self.detail_width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::uniform(1000)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub overview: OverviewGeometry,
    pub detail: DetailGeometry,
}

/// Outputs of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub overview: OverviewLayout,
    /// Present when a detail group was requested.
    pub detail: Option<DetailLayout>,
}

/// Selectable groups for the loaded data and config.
pub fn compute_candidates(
    dataset: &Dataset,
    config: &AppConfig,
    costs: &CostTable,
    bans: &BanSet,
) -> Vec<Candidate> {
    enumerate_candidates(dataset.group_max_n(), bans, costs, config.min_total_n)
}

/// Lays out the overview for `selection` and, optionally, the forest plot
/// for `detail_key`, using the default geometry.
pub fn compute_layout(
    dataset: &Dataset,
    config: &AppConfig,
    selection: &[GroupKey],
    detail_key: Option<&GroupKey>,
    viewport: Viewport,
) -> LayoutResult {
    compute_layout_with(
        dataset,
        config,
        selection,
        detail_key,
        viewport,
        &Geometry::default(),
    )
}

pub fn compute_layout_with(
    dataset: &Dataset,
    config: &AppConfig,
    selection: &[GroupKey],
    detail_key: Option<&GroupKey>,
    viewport: Viewport,
    geometry: &Geometry,
) -> LayoutResult {
    let span = info_span!("layout", rows = selection.len());
    let _guard = span.enter();

    let overview = layout_overview(
        dataset,
        &config.support_gates,
        selection,
        viewport.overview_width(),
        &geometry.overview,
    );
    let detail = detail_key.map(|key| {
        layout_detail(
            dataset,
            &config.support_gates,
            &config.detail_plot,
            key,
            viewport.detail_width(),
            &geometry.detail,
        )
    });
    LayoutResult { overview, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_floor() {
        let viewport = Viewport::new(320, 1200);
        assert_eq!(viewport.overview_width(), 600);
        assert_eq!(viewport.detail_width(), 1200);
    }

    #[test]
    fn test_detail_only_when_requested() {
        let dataset = Dataset::default();
        let config = AppConfig::default();
        let key = GroupKey::new("TFT15_Ashe", 2);
        let without = compute_layout(&dataset, &config, &[key.clone()], None, Viewport::default());
        assert!(without.detail.is_none());
        let with = compute_layout(&dataset, &config, &[], Some(&key), Viewport::default());
        assert_eq!(with.detail.map(|d| d.row_count()), Some(0));
    }
}
