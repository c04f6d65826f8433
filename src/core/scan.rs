use crate::db::log::audit_best_effort;
use crate::db::queries::insert_event;
use crate::db::users::{find_by_qr, find_by_username};
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::AttendanceEvent;
use crate::models::event_kind::EventKind;
use crate::models::user::User;
use chrono::{Local, NaiveDateTime, Timelike};
use rusqlite::Connection;

/// How the scanner identified the person.
#[derive(Debug, Clone)]
pub enum Badge {
    Qr(String),
    Username(String),
}

pub struct ScanLogic;

impl ScanLogic {
    pub fn resolve(conn: &Connection, badge: &Badge) -> AppResult<User> {
        let found = match badge {
            Badge::Qr(data) => find_by_qr(conn, data.trim())?,
            Badge::Username(name) => find_by_username(conn, name.trim())?,
        };

        found.ok_or_else(|| match badge {
            Badge::Qr(data) => AppError::UserNotFound(format!("QR {data}")),
            Badge::Username(name) => AppError::UserNotFound(name.clone()),
        })
    }

    /// Record a punch. `at` defaults to the local wall clock.
    pub fn record(
        conn: &Connection,
        badge: &Badge,
        kind: EventKind,
        at: Option<NaiveDateTime>,
    ) -> AppResult<AttendanceEvent> {
        let user = Self::resolve(conn, badge)?;
        let timestamp = at.unwrap_or_else(|| Local::now().naive_local());

        // stored with second precision
        let timestamp = timestamp
            .with_nanosecond(0)
            .ok_or_else(|| AppError::InvalidTimestamp(timestamp.to_string()))?;

        let id = insert_event(conn, user.id, kind, timestamp)?;
        let event = AttendanceEvent::new(id, user.username.clone(), kind, timestamp)?;

        tracing::info!(employee = %event.employee, kind = %kind, timestamp = %timestamp, "scan recorded");
        audit_best_effort(
            conn,
            "scan",
            &user.username,
            &format!("{} at {}", kind, event.timestamp_str()),
        );

        Ok(event)
    }
}
