//! Per-employee payroll totals: worked hours, holiday/Sunday hours, overtime.

use crate::core::calculator::calendar::NonWorkingDays;
use crate::core::calculator::sessions::WorkSession;
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::TIMESTAMP_FORMAT;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_OVERTIME_THRESHOLD_HOURS: f64 = 8.0;

/// How overtime is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeMode {
    /// Each session is compared with the threshold on its own.
    #[default]
    PerSession,
    /// Sessions starting on the same date are summed first.
    PerDay,
}

/// What to do with a session whose exit is before its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeDurationPolicy {
    /// Add the negative duration to the totals unchanged.
    #[default]
    Keep,
    /// Leave the session out of every total.
    Skip,
    /// Abort the aggregation.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayrollPolicy {
    pub overtime_threshold_hours: f64,
    pub overtime_mode: OvertimeMode,
    pub negative_durations: NegativeDurationPolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            overtime_threshold_hours: DEFAULT_OVERTIME_THRESHOLD_HOURS,
            overtime_mode: OvertimeMode::default(),
            negative_durations: NegativeDurationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub total_hours: f64,
    pub holiday_or_sunday_hours: f64,
    pub overtime_hours: f64,
}

impl PayrollSummary {
    fn rounded(self) -> Self {
        Self {
            total_hours: round2(self.total_hours),
            holiday_or_sunday_hours: round2(self.holiday_or_sunday_hours),
            overtime_hours: round2(self.overtime_hours),
        }
    }
}

/// Round to two decimals, exact halves to even (`8.125` → `8.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn overtime_of(hours: f64, threshold: f64) -> f64 {
    if hours > threshold {
        hours - threshold
    } else {
        0.0
    }
}

/// Fold sessions into one summary per employee.
///
/// Sums are accumulated unrounded; the three fields are rounded at the end.
pub fn aggregate<C>(
    sessions: &[WorkSession],
    calendar: &C,
    policy: &PayrollPolicy,
) -> AppResult<BTreeMap<String, PayrollSummary>>
where
    C: NonWorkingDays + ?Sized,
{
    let threshold = policy.overtime_threshold_hours;
    let mut totals: BTreeMap<String, PayrollSummary> = BTreeMap::new();
    let mut daily: BTreeMap<(&str, NaiveDate), f64> = BTreeMap::new();

    for session in sessions {
        let hours = session.duration_hours();

        if session.is_negative() {
            tracing::warn!(
                employee = %session.employee,
                start = %session.start,
                end = %session.end,
                hours,
                policy = ?policy.negative_durations,
                "work session ends before it starts"
            );

            match policy.negative_durations {
                NegativeDurationPolicy::Keep => {}
                NegativeDurationPolicy::Skip => continue,
                NegativeDurationPolicy::Reject => {
                    return Err(AppError::NegativeSession {
                        employee: session.employee.clone(),
                        start: session.start.format(TIMESTAMP_FORMAT).to_string(),
                        end: session.end.format(TIMESTAMP_FORMAT).to_string(),
                    });
                }
            }
        }

        let summary = totals.entry(session.employee.clone()).or_default();
        summary.total_hours += hours;

        if calendar.is_non_working_day(session.start.date()) {
            summary.holiday_or_sunday_hours += hours;
        }

        match policy.overtime_mode {
            OvertimeMode::PerSession => summary.overtime_hours += overtime_of(hours, threshold),
            OvertimeMode::PerDay => {
                *daily
                    .entry((session.employee.as_str(), session.start.date()))
                    .or_default() += hours;
            }
        }
    }

    for ((employee, _), hours) in daily {
        if let Some(summary) = totals.get_mut(employee) {
            summary.overtime_hours += overtime_of(hours, threshold);
        }
    }

    Ok(totals
        .into_iter()
        .map(|(employee, summary)| (employee, summary.rounded()))
        .collect())
}
