//! Range totals, project breakdown and the high-value split.
//!
//! # Responsibility
//! - Aggregate a date-filtered view of the journal into summary statistics.
//!
//! # Invariants
//! - Range totals count planned and completed logs alike, matching the
//!   journal's global total semantics rather than the ledger's.
//! - The breakdown walks projects in ledger order, drops zero-hour entries
//!   and sorts descending by value; ties keep ledger order.
//! - Logs whose project is gone count toward range totals but are excluded
//!   from the breakdown and the high-value split.
//! - Ratio outputs are 0 when their denominator is not positive.

use crate::model::{DateRange, Project, TimeLog};

/// Hourly rate at or above which a project counts as high-value.
pub const HIGH_VALUE_RATE_THRESHOLD: f64 = 300.0;

/// One project's share of the summarized range.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectStat<'a> {
    pub project: &'a Project,
    pub hours: f64,
    pub value: f64,
    /// Share of the range's total value, `0..=100`.
    pub percentage: f64,
}

/// Totals over logs owned by projects at or above the rate threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HighValueSplit {
    pub value: f64,
    pub hours: f64,
    /// Share of the range's total value, `0..=100`.
    pub percentage: f64,
}

/// Derived statistics over one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary<'a> {
    /// Sum of `value` over all logs in range, planned and completed.
    pub total_value: f64,
    /// Sum of `duration` over all logs in range.
    pub total_hours: f64,
    /// `total_value / total_hours`, 0 when no positive hours.
    pub avg_hourly_rate: f64,
    /// Non-zero-hour projects, sorted descending by value.
    pub project_stats: Vec<ProjectStat<'a>>,
    pub high_value: HighValueSplit,
}

/// Summarizes the journal over `range` against the current ledger.
pub fn summarize<'a>(
    range: DateRange,
    projects: &'a [Project],
    time_logs: &[TimeLog],
) -> AnalyticsSummary<'a> {
    let filtered: Vec<&TimeLog> = time_logs
        .iter()
        .filter(|log| range.contains(log.date))
        .collect();

    let total_value: f64 = filtered.iter().map(|log| log.value).sum();
    let total_hours: f64 = filtered.iter().map(|log| log.duration).sum();
    let avg_hourly_rate = if total_hours > 0.0 {
        total_value / total_hours
    } else {
        0.0
    };

    let mut project_stats: Vec<ProjectStat<'a>> = projects
        .iter()
        .map(|project| {
            let (hours, value) = filtered
                .iter()
                .filter(|log| log.project_id == project.id)
                .fold((0.0, 0.0), |(hours, value), log| {
                    (hours + log.duration, value + log.value)
                });
            ProjectStat {
                project,
                hours,
                value,
                percentage: share_of(value, total_value),
            }
        })
        .filter(|stat| stat.hours > 0.0)
        .collect();
    project_stats.sort_by(|a, b| b.value.total_cmp(&a.value));

    let (high_value_total, high_value_hours) = filtered
        .iter()
        .filter(|log| {
            projects
                .iter()
                .find(|project| project.id == log.project_id)
                .is_some_and(|project| project.hourly_rate >= HIGH_VALUE_RATE_THRESHOLD)
        })
        .fold((0.0, 0.0), |(value, hours), log| {
            (value + log.value, hours + log.duration)
        });

    AnalyticsSummary {
        total_value,
        total_hours,
        avg_hourly_rate,
        project_stats,
        high_value: HighValueSplit {
            value: high_value_total,
            hours: high_value_hours,
            percentage: share_of(high_value_total, total_value),
        },
    }
}

fn share_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}
