use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of punch recorded by the scanner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Entry,
    Exit,
    StartLunch,
    EndLunch,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Entry,
        EventKind::Exit,
        EventKind::StartLunch,
        EventKind::EndLunch,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Entry => "entry",
            EventKind::Exit => "exit",
            EventKind::StartLunch => "start_lunch",
            EventKind::EndLunch => "end_lunch",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(EventKind::Entry),
            "exit" => Some(EventKind::Exit),
            "start_lunch" => Some(EventKind::StartLunch),
            "end_lunch" => Some(EventKind::EndLunch),
            _ => None,
        }
    }

    /// Parse user input (case-insensitive, `-` accepted for `_`).
    pub fn parse(s: &str) -> AppResult<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::from_db_str(&normalized).ok_or_else(|| AppError::InvalidEventKind(s.to_string()))
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, EventKind::Entry)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, EventKind::Exit)
    }

    pub fn is_lunch(&self) -> bool {
        matches!(self, EventKind::StartLunch | EventKind::EndLunch)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
