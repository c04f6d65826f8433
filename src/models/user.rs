use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Employee,
    Supervisor,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Supervisor => "supervisor",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(&s.trim().to_lowercase()).ok_or_else(|| AppError::InvalidRole(s.into()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// A registered employee (or admin/supervisor) able to scan in.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub cedula: Option<String>,
    pub area: Option<String>,
    pub qr_code_data: String,
    pub created_at: String,
}

/// Fields accepted by `user add`.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub role: Role,
    pub cedula: Option<String>,
    pub area: Option<String>,
}

/// Partial update for `user update`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub cedula: Option<String>,
    pub area: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.role.is_none() && self.cedula.is_none() && self.area.is_none()
    }
}

/// QR payload printed on the badge: `user:<username>:<8 hex chars>`.
pub fn generate_qr_payload(username: &str) -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("user:{}:{}", username, &token[..8])
}
