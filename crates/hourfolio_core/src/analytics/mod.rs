//! Summary statistics over a date-filtered journal view.
//!
//! # Responsibility
//! - Expose the pure aggregation that turns projects plus time logs into
//!   range totals, a per-project breakdown and the high-value split.
//!
//! # See also
//! - crate::store::context for the wiring against live stores.

pub mod summary;

pub use summary::{
    summarize, AnalyticsSummary, HighValueSplit, ProjectStat, HIGH_VALUE_RATE_THRESHOLD,
};
