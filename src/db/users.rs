use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, Role, User, UserUpdate, generate_qr_payload};
use chrono::Local;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        role,
        cedula: row.get("cedula")?,
        area: row.get("area")?,
        qr_code_data: row.get("qr_code_data")?,
        created_at: row.get("created_at")?,
    })
}

const SELECT_USERS: &str =
    "SELECT id, username, role, cedula, area, qr_code_data, created_at FROM users";

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

/// Register a user and return it with its generated QR payload.
pub fn insert_user(conn: &Connection, new: &NewUser) -> AppResult<User> {
    let username = new.username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidEmployee(new.username.clone()));
    }

    if find_by_username(conn, username)?.is_some() {
        return Err(AppError::DuplicateUser(username.to_string()));
    }

    let qr = generate_qr_payload(username);
    let created_at = Local::now().to_rfc3339();

    conn.execute(
        "INSERT INTO users (username, role, cedula, area, qr_code_data, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            username,
            new.role.to_db_str(),
            new.cedula,
            new.area,
            qr,
            created_at
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateUser(format!("{username} (username or cedula already registered)"))
        } else {
            AppError::Db(e)
        }
    })?;

    find_by_id(conn, conn.last_insert_rowid())?
        .ok_or_else(|| AppError::Other("inserted user vanished".into()))
}

/// Users, newest first.
pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USERS} ORDER BY id DESC"))?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USERS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USERS} WHERE username = ?1"))?;
    Ok(stmt.query_row([username], map_user).optional()?)
}

pub fn find_by_qr(conn: &Connection, qr: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USERS} WHERE qr_code_data = ?1"))?;
    Ok(stmt.query_row([qr], map_user).optional()?)
}

/// Apply a partial update; returns the stored user afterwards.
pub fn update_user(conn: &Connection, id: i64, upd: &UserUpdate) -> AppResult<User> {
    let current = find_by_id(conn, id)?.ok_or_else(|| AppError::UserNotFound(id.to_string()))?;

    let username = upd
        .username
        .as_deref()
        .map(str::trim)
        .unwrap_or(&current.username)
        .to_string();
    if username.is_empty() {
        return Err(AppError::InvalidEmployee(username));
    }

    let role = upd.role.unwrap_or(current.role);
    // an empty string clears the optional fields
    let cedula = match &upd.cedula {
        Some(c) if c.trim().is_empty() => None,
        Some(c) => Some(c.trim().to_string()),
        None => current.cedula,
    };
    let area = match &upd.area {
        Some(a) if a.trim().is_empty() => None,
        Some(a) => Some(a.trim().to_string()),
        None => current.area,
    };

    conn.execute(
        "UPDATE users SET username = ?1, role = ?2, cedula = ?3, area = ?4 WHERE id = ?5",
        params![username, role.to_db_str(), cedula, area, id],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateUser(format!("{username} (username or cedula already registered)"))
        } else {
            AppError::Db(e)
        }
    })?;

    find_by_id(conn, id)?.ok_or_else(|| AppError::UserNotFound(id.to_string()))
}

/// Delete a user and all of their events. Returns the number of events removed.
pub fn delete_user(conn: &mut Connection, id: i64) -> AppResult<usize> {
    let tx = conn.transaction()?;

    let events = tx.execute("DELETE FROM logs WHERE user_id = ?1", [id])?;
    let users = tx.execute("DELETE FROM users WHERE id = ?1", [id])?;

    if users == 0 {
        // dropping tx rolls back
        return Err(AppError::UserNotFound(id.to_string()));
    }

    tx.commit()?;
    Ok(events)
}
