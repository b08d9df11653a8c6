//! Overview layout: one row per selected group, items as icons along a
//! shared coefficient axis.
//!
//! Items whose icons would land at nearly the same x are grouped into
//! horizontal buckets and fanned out vertically around the row center:
//! the first item sits on the center line, later ones alternate above and
//! below at growing distances.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use effects_model::{
    EffectRecord, GroupKey, LayoutItem, OverviewLayout, OverviewRow, SupportGateConfig,
};
use tracing::debug;

use crate::gate;
use crate::records::Dataset;
use crate::scale::{LinearScale, round2};

/// Pixel geometry and value domain of the overview plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewGeometry {
    /// Coefficients outside this range are clamped onto its edges, except
    /// that items above the maximum are dropped entirely.
    pub domain: (f64, f64),
    pub row_height: u32,
    /// Vertical margin kept free at the top and bottom of each row.
    pub row_inner_gap: u32,
    pub item_size: u32,
    pub gutter_left: u32,
    pub gutter_right: u32,
    /// Width of an x bucket; items rounding to the same bucket are stacked.
    pub bucket_px: u32,
    pub min_height: u32,
    pub min_spacing: u32,
    pub min_half_usable: u32,
}

impl Default for OverviewGeometry {
    fn default() -> Self {
        Self {
            domain: (-0.5, 0.2),
            row_height: 160,
            row_inner_gap: 14,
            item_size: 40,
            gutter_left: 150,
            gutter_right: 60,
            bucket_px: 16,
            min_height: 200,
            min_spacing: 6,
            min_half_usable: 8,
        }
    }
}

impl OverviewGeometry {
    /// Scale for a plot of the given total width.
    pub fn scale(&self, width: u32) -> LinearScale {
        LinearScale::new(
            self.domain,
            (
                f64::from(self.gutter_left),
                f64::from(width) - f64::from(self.gutter_right),
            ),
        )
    }

    /// Icon top edge for an unstacked item in row `index`.
    fn y_center(&self, index: usize) -> f64 {
        let row_height = f64::from(self.row_height);
        index as f64 * row_height + (row_height - f64::from(self.item_size)) / 2.0
    }

    /// Vertical distance between successive stack levels for a bucket of
    /// `count` items.
    pub fn stack_spacing(&self, count: usize) -> f64 {
        let max_level = count / 2;
        let half_usable = ((f64::from(self.row_height) - f64::from(self.item_size)) / 2.0
            - f64::from(self.row_inner_gap))
        .floor()
        .max(f64::from(self.min_half_usable));
        (half_usable / max_level.max(1) as f64)
            .floor()
            .max(f64::from(self.min_spacing))
    }
}

/// Offset of the `index`-th item in a bucket: 0, -s, +s, -2s, +2s, ...
pub fn stack_offset(index: usize, spacing: f64) -> f64 {
    if index == 0 {
        return 0.0;
    }
    let level = index.div_ceil(2) as f64;
    if index % 2 == 1 {
        -level * spacing
    } else {
        level * spacing
    }
}

struct Placed<'a> {
    record: &'a EffectRecord,
    coef: f64,
    x: f64,
}

fn layout_row(
    dataset: &Dataset,
    gates: &SupportGateConfig,
    geometry: &OverviewGeometry,
    scale: &LinearScale,
    index: usize,
    key: &GroupKey,
) -> OverviewRow {
    let group_max_n = dataset.group_max_n().get_or_zero(key);
    let y_center = geometry.y_center(index);
    let (_, domain_max) = geometry.domain;
    let bucket_px = f64::from(geometry.bucket_px.max(1));

    let mut buckets: BTreeMap<i64, Vec<Placed<'_>>> = BTreeMap::new();
    for record in dataset.records_for(key) {
        let Some(coef) = record.coef else {
            continue;
        };
        if coef > domain_max || !gate::admit(record, group_max_n, gates) {
            continue;
        }
        let coef = round2(coef);
        let x = scale.apply(coef);
        let bucket = (x / bucket_px).round() as i64;
        buckets
            .entry(bucket)
            .or_default()
            .push(Placed { record, coef, x });
    }

    let mut items = Vec::new();
    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| a.coef.partial_cmp(&b.coef).unwrap_or(Ordering::Equal));
        let spacing = geometry.stack_spacing(bucket.len());
        for (position, placed) in bucket.iter().enumerate() {
            items.push(LayoutItem {
                character_id: placed.record.character_id.clone(),
                star: placed.record.star,
                feature: placed.record.feature.clone(),
                coef: placed.coef,
                n_support: placed.record.n_support,
                ci_high: placed.record.ci_high,
                x: placed.x.round() as i32,
                y: (y_center + stack_offset(position, spacing)).round() as i32,
                row: index,
            });
        }
    }
    debug!(
        row = index,
        key = %key,
        items = items.len(),
        buckets = buckets.len(),
        "laid out overview row"
    );

    OverviewRow {
        index,
        key: key.clone(),
        top: (index as f64 * f64::from(geometry.row_height)).round() as i32,
        y_center: y_center.round() as i32,
        items,
    }
}

/// Lays out the overview for the selected groups, one row per key in order.
///
/// Each row keeps items that have a coefficient no greater than the domain
/// maximum and pass the support gate against the group's maximum total
/// sample size (zero when unknown). Rows without admitted items are still
/// emitted so the row count always equals the selection length.
pub fn layout_overview(
    dataset: &Dataset,
    gates: &SupportGateConfig,
    selection: &[GroupKey],
    width: u32,
    geometry: &OverviewGeometry,
) -> OverviewLayout {
    let scale = geometry.scale(width);
    let rows: Vec<OverviewRow> = selection
        .iter()
        .enumerate()
        .map(|(index, key)| layout_row(dataset, gates, geometry, &scale, index, key))
        .collect();
    let rows_height = u32::try_from(rows.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(geometry.row_height);

    OverviewLayout {
        width,
        height: rows_height.max(geometry.min_height),
        row_height: geometry.row_height,
        rows,
        ticks: scale.ticks(),
    }
}
