//! Layout outputs consumed by renderers.
//!
//! All coordinates are integer pixels. Layouts are recomputed from scratch on
//! every pass; nothing here is patched incrementally.

use serde::{Deserialize, Serialize};

use crate::group::GroupKey;

/// A selectable `(character, star)` combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub star: u32,
    pub key: GroupKey,
    /// Display label, e.g. `"Ashe ★2"`.
    pub label: String,
}

/// An axis tick with its pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub x: i32,
    pub label: String,
}

/// An item icon placed on the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub character_id: String,
    pub star: u32,
    pub feature: String,
    /// Coefficient rounded to two decimals, as positioned.
    pub coef: f64,
    pub n_support: Option<f64>,
    pub ci_high: Option<f64>,
    /// Left edge of the icon.
    pub x: i32,
    /// Top edge of the icon.
    pub y: i32,
    /// Index of the overview row this item belongs to.
    pub row: usize,
}

/// One overview row. Rows with no admitted items are still emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub index: usize,
    pub key: GroupKey,
    /// Top edge of the row band.
    pub top: i32,
    /// Icon top edge for an unstacked item.
    pub y_center: i32,
    pub items: Vec<LayoutItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewLayout {
    pub width: u32,
    pub height: u32,
    pub row_height: u32,
    pub rows: Vec<OverviewRow>,
    pub ticks: Vec<Tick>,
}

impl OverviewLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All items, row by row.
    pub fn items(&self) -> impl Iterator<Item = &LayoutItem> {
        self.rows.iter().flat_map(|row| row.items.iter())
    }
}

/// One forest-plot row: CI bar plus point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestRow {
    /// Position in ascending coefficient order.
    pub rank: usize,
    pub feature: String,
    pub coef: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub n_support: f64,
    /// Vertical middle of the row.
    pub y_mid: i32,
    /// Left end of the CI bar.
    pub x_low: i32,
    /// Right end of the CI bar.
    pub x_high: i32,
    /// Point estimate marker.
    pub x_point: i32,
    /// Unclamped sample-size label, e.g. `"n=42"`.
    pub sample_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLayout {
    pub key: GroupKey,
    pub display_name: String,
    /// Maximum total sample size of the group, 0 when unknown.
    pub total_n: f64,
    pub width: u32,
    pub height: u32,
    pub px_min: i32,
    pub px_max: i32,
    /// Left edge of the sample-size label column.
    pub label_x: i32,
    pub rows: Vec<ForestRow>,
    pub ticks: Vec<Tick>,
}

impl DetailLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
