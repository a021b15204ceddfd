//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! the people who record time and the administrators who manage them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The access level of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Records their own time.
    #[default]
    Employee,
    /// Manages employees, projects and reports.
    Admin,
}

impl Role {
    /// The lowercase label used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }
}

/// Represents a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the account.
    pub id: Uuid,
    /// The human-facing badge number (e.g., "EMP-001").
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Sign-in email address.
    pub email: String,
    /// Access level.
    #[serde(default)]
    pub role: Role,
    /// Optional avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Returns true if the account has administrator rights.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::{Employee, Role};
    /// use chrono::Utc;
    /// use uuid::Uuid;
    ///
    /// let admin = Employee {
    ///     id: Uuid::new_v4(),
    ///     employee_id: "EMP-001".to_string(),
    ///     name: "Dana Admin".to_string(),
    ///     email: "dana@example.com".to_string(),
    ///     role: Role::Admin,
    ///     avatar_url: None,
    ///     created_at: Utc::now(),
    /// };
    /// assert!(admin.is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
