//! Weekly calendar slot resolution.
//!
//! # Responsibility
//! - Expose the pure per-cell occupancy computation over a Monday-start
//!   week and the displayed hour band.
//! - Keep week/date arithmetic in one place for calendar consumers.
//!
//! # See also
//! - crate::store::context for the wiring against live stores.

pub mod slots;

pub use slots::{
    display_hours, resolve_slot, resolve_week, week_bounds, week_dates, weekday_index,
    DayOccupancy, SlotCell, WeekOccupancy, DISPLAY_END_HOUR, DISPLAY_START_HOUR,
};
