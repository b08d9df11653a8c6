//! Data model for item effect plots.
//!
//! Raw rows flow in from a spreadsheet or CSV parser, get mapped onto the
//! canonical field set, are coerced into [`EffectRecord`]s, and finally come
//! out as [`Candidate`] lists and pixel layouts.

pub mod config;
pub mod error;
pub mod group;
pub mod layout;
pub mod record;
pub mod row;
pub mod value;

pub use config::{
    AppConfig, ClampConfig, DetailPlotConfig, GateThresholds, RareGateThresholds,
    SupportGateConfig, Target,
};
pub use error::{ModelError, Result};
pub use group::GroupKey;
pub use layout::{
    Candidate, DetailLayout, ForestRow, LayoutItem, OverviewLayout, OverviewRow, Tick,
};
pub use record::EffectRecord;
pub use row::{CanonicalField, CanonicalRow, RawRow};
pub use value::{CellValue, parse_numeric};
