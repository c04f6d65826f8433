use crate::core::calculator::payroll::PayrollSummary;
use crate::models::attendance_event::AttendanceEvent;
use crate::utils::formatting::hours2;
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat CSV row for a raw event.
#[derive(Serialize, Clone, Debug)]
pub struct EventRow {
    pub id: i64,
    pub employee: String,
    pub kind: String,
    pub timestamp: String,
}

impl From<&AttendanceEvent> for EventRow {
    fn from(e: &AttendanceEvent) -> Self {
        Self {
            id: e.id,
            employee: e.employee.clone(),
            kind: e.kind.to_db_str().to_string(),
            timestamp: e.timestamp_str(),
        }
    }
}

/// Flat CSV row for one employee's payroll totals.
#[derive(Serialize, Clone, Debug)]
pub struct SummaryRow {
    pub employee: String,
    pub total_hours: f64,
    pub holiday_or_sunday_hours: f64,
    pub overtime_hours: f64,
}

pub(crate) const EVENT_HEADERS: [&str; 4] = ["id", "employee", "kind", "timestamp"];

pub(crate) const SUMMARY_HEADERS: [&str; 4] =
    ["employee", "total hours", "holiday/Sunday hours", "overtime hours"];

pub(crate) fn summary_rows(summary: &BTreeMap<String, PayrollSummary>) -> Vec<SummaryRow> {
    summary
        .iter()
        .map(|(employee, s)| SummaryRow {
            employee: employee.clone(),
            total_hours: s.total_hours,
            holiday_or_sunday_hours: s.holiday_or_sunday_hours,
            overtime_hours: s.overtime_hours,
        })
        .collect()
}

pub(crate) fn events_to_table(events: &[AttendanceEvent]) -> Vec<Vec<String>> {
    events
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.employee.clone(),
                e.kind.to_db_str().to_string(),
                e.timestamp_str(),
            ]
        })
        .collect()
}

pub(crate) fn summary_to_table(summary: &BTreeMap<String, PayrollSummary>) -> Vec<Vec<String>> {
    summary
        .iter()
        .map(|(employee, s)| {
            vec![
                employee.clone(),
                hours2(s.total_hours),
                hours2(s.holiday_or_sunday_hours),
                hours2(s.overtime_hours),
            ]
        })
        .collect()
}
