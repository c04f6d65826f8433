//! Rebuilds work sessions from the raw punch stream.
//!
//! Pairing is greedy: every `entry` takes the first later `exit` of the same
//! employee, and whatever sits between the two (repeated entries, lunch
//! punches) is swallowed. An `entry` with no later `exit` produces nothing.

use crate::models::attendance_event::AttendanceEvent;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkSession {
    pub employee: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WorkSession {
    /// Signed length in hours. Negative when the exit precedes the entry.
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn is_negative(&self) -> bool {
        self.end < self.start
    }
}

/// Group events by employee and pair them into sessions.
///
/// Employees come out in ascending identifier order, sessions in
/// chronological order within each employee.
pub fn reconstruct(events: &[AttendanceEvent]) -> Vec<WorkSession> {
    let mut by_employee: BTreeMap<&str, Vec<&AttendanceEvent>> = BTreeMap::new();
    for ev in events {
        by_employee.entry(ev.employee.as_str()).or_default().push(ev);
    }

    by_employee
        .into_iter()
        .flat_map(|(employee, mut evs)| {
            // stable: equal timestamps keep their input order
            evs.sort_by_key(|e| e.timestamp);
            pair_entries(employee, &evs)
        })
        .collect()
}

fn pair_entries(employee: &str, events: &[&AttendanceEvent]) -> Vec<WorkSession> {
    let mut sessions = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = events[cursor..].iter().position(|e| e.kind.is_entry()) {
        let entry_idx = cursor + offset;
        let entry = events[entry_idx];

        let Some(exit_offset) = events[entry_idx + 1..]
            .iter()
            .position(|e| e.kind.is_exit())
        else {
            // no exit after this entry, so none after any later entry either
            tracing::debug!(employee, entry = %entry.timestamp, "dropping unpaired entry");
            break;
        };

        let exit_idx = entry_idx + 1 + exit_offset;
        sessions.push(WorkSession {
            employee: employee.to_string(),
            start: entry.timestamp,
            end: events[exit_idx].timestamp,
        });

        cursor = exit_idx + 1;
    }

    sessions
}
