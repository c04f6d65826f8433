use crate::config::Config;
use crate::core::calculator::calendar::NonWorkingDays;
use crate::core::calculator::payroll::{self, PayrollPolicy, PayrollSummary};
use crate::core::calculator::sessions::{self, WorkSession};
use crate::db::queries::{EventFilter, search_events};
use crate::errors::AppResult;
use crate::models::attendance_event::AttendanceEvent;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a renderer needs: the matching events and the payroll totals.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollReport {
    pub summary: BTreeMap<String, PayrollSummary>,
    pub events: Vec<AttendanceEvent>,
    #[serde(skip)]
    pub sessions: Vec<WorkSession>,
}

impl PayrollReport {
    /// Pure part: reconstruct sessions and aggregate them, one summary per
    /// employee present in `events`.
    pub fn from_events<C>(
        events: Vec<AttendanceEvent>,
        calendar: &C,
        policy: &PayrollPolicy,
    ) -> AppResult<Self>
    where
        C: NonWorkingDays + ?Sized,
    {
        let sessions = sessions::reconstruct(&events);
        let mut summary = payroll::aggregate(&sessions, calendar, policy)?;

        // employees without a counted session still get a zeroed row
        for ev in &events {
            summary.entry(ev.employee.clone()).or_default();
        }

        Ok(Self {
            summary,
            events,
            sessions,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Query the store with `filter` and build the report using the configured
    /// calendar and payroll policy.
    pub fn build(conn: &Connection, filter: &EventFilter, cfg: &Config) -> AppResult<PayrollReport> {
        let events = search_events(conn, filter)?;
        let calendar = cfg.calendar()?;
        let report = PayrollReport::from_events(events, &calendar, &cfg.payroll_policy())?;

        tracing::debug!(
            events = report.events.len(),
            sessions = report.sessions.len(),
            employees = report.summary.len(),
            "payroll report built"
        );

        Ok(report)
    }
}
