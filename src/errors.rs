//! Unified application error type.
//! Every layer (db, core, export, cli) returns AppError so that the binary
//! has a single place where failures are reported.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD HH:MM[:SS])")]
    InvalidTimestamp(String),

    #[error("Invalid event kind: {0} (expected entry, exit, start_lunch or end_lunch)")]
    InvalidEventKind(String),

    #[error("Invalid role: {0} (expected admin, employee or supervisor)")]
    InvalidRole(String),

    #[error("Invalid employee identifier: {0:?}")]
    InvalidEmployee(String),

    // ---------------------------
    // Store lookups
    // ---------------------------
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    // ---------------------------
    // Payroll
    // ---------------------------
    #[error("Negative work session for {employee}: exit {end} is not after entry {start}")]
    NegativeSession {
        employee: String,
        start: String,
        end: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
