use super::event_kind::EventKind;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Storage format of `logs.timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scanner punch, as returned by the event store.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceEvent {
    pub id: i64,                  // ⇔ logs.id
    pub employee: String,         // ⇔ users.username
    pub kind: EventKind,          // ⇔ logs.kind
    pub timestamp: NaiveDateTime, // ⇔ logs.timestamp (TEXT "YYYY-MM-DD HH:MM:SS")
}

impl AttendanceEvent {
    /// Build a validated event. The employee identifier must not be blank.
    pub fn new(
        id: i64,
        employee: impl Into<String>,
        kind: EventKind,
        timestamp: NaiveDateTime,
    ) -> AppResult<Self> {
        let employee = employee.into();
        if employee.trim().is_empty() {
            return Err(AppError::InvalidEmployee(employee));
        }

        Ok(Self {
            id,
            employee,
            kind,
            timestamp,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM` or the ISO `T` variants.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}
