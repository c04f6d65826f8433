use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` (audit) table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            role          TEXT NOT NULL DEFAULT 'employee'
                          CHECK(role IN ('admin','employee','supervisor')),
            cedula        TEXT UNIQUE,
            area          TEXT,
            qr_code_data  TEXT NOT NULL UNIQUE,
            created_at    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS logs (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            kind       TEXT NOT NULL
                       CHECK(kind IN ('entry','exit','start_lunch','end_lunch')),
            timestamp  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_logs_user_ts ON logs(user_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_logs_ts ON logs(timestamp);
        "#,
    )?;
    Ok(())
}

/// Older databases were created before employees carried an ID number
/// (`cedula`) and an area.
fn migrate_add_user_fields(conn: &Connection) -> Result<()> {
    let version = "20240601_0002_add_cedula_area";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "users", "cedula")? {
        // SQLite refuses ADD COLUMN ... UNIQUE, so the constraint becomes an index
        conn.execute_batch(
            "ALTER TABLE users ADD COLUMN cedula TEXT;
             CREATE UNIQUE INDEX IF NOT EXISTS idx_users_cedula ON users(cedula);",
        )?;
        tracing::info!("added 'cedula' column to users");
    }

    if !table_has_column(conn, "users", "area")? {
        conn.execute_batch("ALTER TABLE users ADD COLUMN area TEXT;")?;
        tracing::info!("added 'area' column to users");
    }

    mark_applied(conn, version, "Added cedula/area to users")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "users")? {
        create_users_table(conn)?;
        tracing::info!("created users table");
    }

    if !table_exists(conn, "logs")? {
        create_logs_table(conn)?;
        tracing::info!("created logs table");
    }

    migrate_add_user_fields(conn)?;

    Ok(())
}
