use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Prepare a freshly opened connection: enforce `logs.user_id` references
/// and bring the schema up to date through the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_pending_migrations(conn)?;

    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    let events: i64 = conn.query_row("SELECT COUNT(*) FROM logs", [], |r| r.get(0))?;
    tracing::debug!(users, events, "database ready");

    Ok(())
}
