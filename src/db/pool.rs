//! SQLite connection wrapper (one connection per command).

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the attendance database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        init_db(&conn)?;
        tracing::debug!(path, "opened attendance database");
        Ok(Self { conn })
    }
}
