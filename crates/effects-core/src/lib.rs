//! Layout core for item effect plots.
//!
//! Takes canonical rows, normalizes character identities, gates items by
//! sample support, enumerates selectable groups, and computes pixel layouts
//! for the overview and detail plots. Everything here is synchronous and
//! free of I/O.

pub mod candidates;
pub mod detail;
pub mod gate;
pub mod identity;
pub mod overview;
pub mod pipeline;
pub mod records;
pub mod scale;
pub mod selection;

pub use candidates::{
    BanSet, CostTable, DEFAULT_BANNED_IDS, candidate_label, eligible_star, enumerate_candidates,
};
pub use detail::{DetailGeometry, layout_detail, sample_label};
pub use gate::{GateClass, GateDecision, admit, evaluate, hard_threshold};
pub use identity::{DEFAULT_SET_PREFIX, IdentityNormalizer, IdentityRule, display_name};
pub use overview::{OverviewGeometry, layout_overview, stack_offset};
pub use pipeline::{
    Geometry, LayoutResult, MIN_VIEWPORT_WIDTH, Viewport, compute_candidates, compute_layout,
    compute_layout_with,
};
pub use records::{Dataset, GroupMaxN, coerce_record};
pub use scale::{LinearScale, MAX_TICKS, TICK_STEP, round2, round_to, scale};
pub use selection::{SLOT_COUNT, default_targets, initial_selection};
