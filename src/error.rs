//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the tracking, session, administration and reporting
//! layers can report. The hours calculator itself never fails.

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tracker.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tracker.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// No project exists with the given identifier.
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// No time entry exists with the given identifier.
    #[error("Time entry not found: {id}")]
    TimeEntryNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// No break exists with the given identifier.
    #[error("Break not found: {id}")]
    BreakNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The time entry already has a clock-out time.
    #[error("Time entry '{entry_id}' is already clocked out")]
    EntryAlreadyClosed {
        /// The closed entry.
        entry_id: String,
    },

    /// The time entry already has a break in progress.
    #[error("Time entry '{entry_id}' already has an active break")]
    BreakAlreadyActive {
        /// The entry with the open break.
        entry_id: String,
    },

    /// The break has already been ended.
    #[error("Break '{break_id}' has already ended")]
    BreakAlreadyEnded {
        /// The ended break.
        break_id: String,
    },

    /// A project cannot be removed while time entries reference it.
    #[error("Project '{project_id}' is referenced by {entry_count} time entries")]
    ProjectInUse {
        /// The project that was to be deleted.
        project_id: String,
        /// How many entries still reference it.
        entry_count: usize,
    },

    /// An employee with the same unique field already exists.
    #[error("An employee with {field} '{value}' already exists")]
    DuplicateEmployee {
        /// The unique field that collided (`email` or `employee_id`).
        field: String,
        /// The colliding value.
        value: String,
    },

    /// Sign-in failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The operation requires a signed-in user.
    #[error("No user is signed in")]
    NotAuthenticated,

    /// The signed-in user lacks the role required for the operation.
    #[error("Operation '{action}' requires an administrator")]
    Forbidden {
        /// The attempted action.
        action: String,
    },

    /// A request field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The persistence collaborator failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_project_in_use_displays_count() {
        let error = EngineError::ProjectInUse {
            project_id: "p1".to_string(),
            entry_count: 3,
        };
        assert_eq!(
            error.to_string(),
            "Project 'p1' is referenced by 3 time entries"
        );
    }

    #[test]
    fn test_duplicate_employee_displays_field_and_value() {
        let error = EngineError::DuplicateEmployee {
            field: "email".to_string(),
            value: "a@example.com".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "An employee with email 'a@example.com' already exists"
        );
    }

    #[test]
    fn test_validation_shorthand() {
        let error = EngineError::validation("name", "must not be blank");
        assert_eq!(error.to_string(), "Invalid field 'name': must not be blank");
    }

    #[test]
    fn test_forbidden_displays_action() {
        let error = EngineError::Forbidden {
            action: "delete_project".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Operation 'delete_project' requires an administrator"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_authenticated() -> EngineResult<()> {
            Err(EngineError::NotAuthenticated)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_authenticated()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::NotAuthenticated)
        ));
    }
}
