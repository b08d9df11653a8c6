//! Detail (forest plot) layout for a single group.

use std::cmp::Ordering;

use effects_model::{DetailLayout, DetailPlotConfig, ForestRow, GroupKey, SupportGateConfig};
use tracing::debug;

use crate::gate;
use crate::identity::display_name;
use crate::records::Dataset;
use crate::scale::LinearScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailGeometry {
    pub row_height: u32,
    /// Width reserved for item icons left of the plot.
    pub icon_col: u32,
    /// Width reserved for sample-size labels right of the plot.
    pub right_col: u32,
    pub pad: u32,
    pub min_height: u32,
    /// The plot area never gets narrower than this.
    pub min_plot_width: u32,
    /// Gap between the plot's right edge and the sample-size labels.
    pub label_gap: u32,
}

impl Default for DetailGeometry {
    fn default() -> Self {
        Self {
            row_height: 50,
            icon_col: 68,
            right_col: 110,
            pad: 18,
            min_height: 120,
            min_plot_width: 200,
            label_gap: 14,
        }
    }
}

impl DetailGeometry {
    /// Horizontal pixel range of the plot area for the given total width.
    pub fn plot_range(&self, width: u32) -> (i64, i64) {
        let px_min = i64::from(self.icon_col) + i64::from(self.pad);
        let fitted = i64::from(width) - i64::from(self.right_col) - i64::from(self.pad);
        (px_min, fitted.max(px_min + i64::from(self.min_plot_width)))
    }
}

/// `"n=42"`, keeping fractional counts as written.
pub fn sample_label(n_support: f64) -> String {
    if n_support.fract() == 0.0 && n_support.abs() < 1e15 {
        format!("n={}", n_support as i64)
    } else {
        format!("n={n_support}")
    }
}

/// Lays out the forest plot for `key`.
///
/// Rows are the group's records that pass the support gate and carry a
/// finite coefficient and both CI bounds, in ascending coefficient order.
/// Bounds and point are clamped to the configured domain before scaling;
/// the sample-size label is never clamped.
pub fn layout_detail(
    dataset: &Dataset,
    gates: &SupportGateConfig,
    plot: &DetailPlotConfig,
    key: &GroupKey,
    width: u32,
    geometry: &DetailGeometry,
) -> DetailLayout {
    let group_max_n = dataset.group_max_n().get_or_zero(key);
    let (px_min, px_max) = geometry.plot_range(width);
    let scale = LinearScale::new((plot.x_min, plot.x_max), (px_min as f64, px_max as f64));

    let mut admitted: Vec<(f64, f64, f64, f64, &str)> = dataset
        .records_for(key)
        .filter(|record| gate::admit(record, group_max_n, gates))
        .filter_map(|record| {
            let coef = record.coef?;
            let ci_low = record.ci_low?;
            let ci_high = record.ci_high?;
            let n_support = record.n_support.unwrap_or(0.0);
            Some((coef, ci_low, ci_high, n_support, record.feature.as_str()))
        })
        .collect();
    admitted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let row_height = f64::from(geometry.row_height);
    let rows: Vec<ForestRow> = admitted
        .into_iter()
        .enumerate()
        .map(|(rank, (coef, ci_low, ci_high, n_support, feature))| {
            let x_lo = scale.apply_px(ci_low);
            let x_hi = scale.apply_px(ci_high);
            ForestRow {
                rank,
                feature: feature.to_string(),
                coef,
                ci_low,
                ci_high,
                n_support,
                y_mid: (rank as f64 * row_height + row_height / 2.0).round() as i32,
                x_low: x_lo.min(x_hi),
                x_high: x_lo.max(x_hi),
                x_point: scale.apply_px(coef),
                sample_label: sample_label(n_support),
            }
        })
        .collect();

    let rows_height = u32::try_from(rows.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(geometry.row_height);
    debug!(key = %key, rows = rows.len(), "laid out detail plot");

    DetailLayout {
        key: key.clone(),
        display_name: display_name(key.character_id()).to_string(),
        total_n: group_max_n,
        width,
        height: rows_height.max(geometry.min_height),
        px_min: saturating_px(px_min),
        px_max: saturating_px(px_max),
        label_x: saturating_px(px_max + i64::from(geometry.label_gap)),
        rows,
        ticks: scale.ticks(),
    }
}

fn saturating_px(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
