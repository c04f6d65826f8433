//! Event store adapter: typed access to the `logs` table.

use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::{AttendanceEvent, TIMESTAMP_FORMAT};
use crate::models::event_kind::EventKind;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, Row, params};

/// Filter shared by `logs`, `report` and `export`.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Substring of the username (case-insensitive for ASCII).
    pub employee: Option<String>,
    pub kind: Option<EventKind>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
    pub newest_first: bool,
}

impl EventFilter {
    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut sql = String::from(" WHERE 1=1");
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = self.employee.as_deref().filter(|n| !n.is_empty()) {
            sql.push_str(" AND users.username LIKE ? ESCAPE '\\'");
            params.push(Box::new(format!("%{}%", escape_like(name))));
        }
        if let Some(kind) = self.kind {
            sql.push_str(" AND logs.kind = ?");
            params.push(Box::new(kind.to_db_str()));
        }
        if let Some(from) = self.from {
            sql.push_str(" AND date(logs.timestamp) >= ?");
            params.push(Box::new(from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            sql.push_str(" AND date(logs.timestamp) <= ?");
            params.push(Box::new(to.format("%Y-%m-%d").to_string()));
        }

        (sql, params)
    }
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

/// Mapping DB row → AttendanceEvent. Rows that do not validate fail the query.
pub fn map_row(row: &Row) -> rusqlite::Result<AttendanceEvent> {
    let id: i64 = row.get("id")?;
    let employee: String = row.get("username")?;
    let kind_str: String = row.get("kind")?;
    let ts_str: String = row.get("timestamp")?;

    let kind = EventKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidEventKind(kind_str.clone())))?;

    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT)
        .map_err(|_| conversion_error(3, AppError::InvalidTimestamp(ts_str.clone())))?;

    AttendanceEvent::new(id, employee, kind, timestamp).map_err(|e| conversion_error(1, e))
}

const SELECT_EVENTS: &str = "SELECT logs.id AS id, users.username AS username,
                                    logs.kind AS kind, logs.timestamp AS timestamp
                             FROM logs
                             JOIN users ON logs.user_id = users.id";

/// All events matching `filter`.
pub fn search_events(conn: &Connection, filter: &EventFilter) -> AppResult<Vec<AttendanceEvent>> {
    let (where_sql, params) = filter.where_clause();

    let order = if filter.newest_first { "DESC" } else { "ASC" };
    let mut sql = format!("{SELECT_EVENTS}{where_sql} ORDER BY logs.timestamp {order}, logs.id {order}");
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    tracing::debug!(?filter, count = out.len(), "loaded events");
    Ok(out)
}

/// Latest `n` events, newest first.
pub fn recent_events(conn: &Connection, n: usize) -> AppResult<Vec<AttendanceEvent>> {
    search_events(
        conn,
        &EventFilter {
            limit: Some(n),
            newest_first: true,
            ..EventFilter::default()
        },
    )
}

/// Store a punch for `user_id` and return the new row id.
pub fn insert_event(
    conn: &Connection,
    user_id: i64,
    kind: EventKind,
    timestamp: NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO logs (user_id, kind, timestamp) VALUES (?1, ?2, ?3)",
        params![
            user_id,
            kind.to_db_str(),
            timestamp.format(TIMESTAMP_FORMAT).to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM logs WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::EventNotFound(id));
    }
    Ok(())
}
