//! Persistence collaborator for employees, projects, time entries and breaks.
//!
//! The engine never owns storage; it talks to whatever implements
//! [`TimeEntryStore`]. [`MemoryStore`] is the in-process implementation used
//! by the server binary and the tests.

mod filter;
mod memory;

pub use filter::EntryFilter;
pub use memory::MemoryStore;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{BreakRecord, Employee, Project, TimeEntry};

/// Row-level access to stored records.
pub trait TimeEntryStore: Send + Sync {
    /// Insert a new employee profile.
    fn insert_employee(&self, employee: Employee) -> EngineResult<Employee>;

    /// Fetch an employee by account identifier.
    fn find_employee(&self, id: Uuid) -> EngineResult<Option<Employee>>;

    /// Fetch an employee by badge number.
    fn find_employee_by_badge(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Fetch an employee by email, compared case-insensitively.
    fn find_employee_by_email(&self, email: &str) -> EngineResult<Option<Employee>>;

    /// All employees, ordered by name.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Insert a new project.
    fn insert_project(&self, project: Project) -> EngineResult<Project>;

    /// Fetch a project by identifier.
    fn find_project(&self, id: Uuid) -> EngineResult<Option<Project>>;

    /// All projects, ordered by name.
    fn list_projects(&self) -> EngineResult<Vec<Project>>;

    /// Remove a project. Returns false if it did not exist.
    fn delete_project(&self, id: Uuid) -> EngineResult<bool>;

    /// Insert a new time entry.
    fn insert_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Insert a new time entry unless its user already has an open entry
    /// dated the same day, in which case that entry is returned instead.
    ///
    /// The check and the insert happen atomically.
    fn insert_entry_unless_open(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Replace a stored time entry. Fails with `TimeEntryNotFound` if absent.
    fn update_entry(&self, entry: &TimeEntry) -> EngineResult<()>;

    /// Fetch a time entry by identifier.
    fn find_entry(&self, id: Uuid) -> EngineResult<Option<TimeEntry>>;

    /// Entries matching the filter, newest date first.
    fn query_entries(&self, filter: &EntryFilter) -> EngineResult<Vec<TimeEntry>>;

    /// Insert a new break.
    fn insert_break(&self, record: BreakRecord) -> EngineResult<BreakRecord>;

    /// Replace a stored break. Fails with `BreakNotFound` if absent.
    fn update_break(&self, record: &BreakRecord) -> EngineResult<()>;

    /// Fetch a break by identifier.
    fn find_break(&self, id: Uuid) -> EngineResult<Option<BreakRecord>>;

    /// The break in progress on an entry, if any.
    fn active_break(&self, time_entry_id: Uuid) -> EngineResult<Option<BreakRecord>>;
}
