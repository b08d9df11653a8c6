//! CLI library components for the effect plot tool.

pub mod logging;
pub mod report;
pub mod session;
