//! In-memory implementation of the store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakRecord, Employee, Project, TimeEntry};

use super::{EntryFilter, TimeEntryStore};

#[derive(Debug, Default)]
struct Tables {
    employees: HashMap<Uuid, Employee>,
    projects: HashMap<Uuid, Project>,
    entries: HashMap<Uuid, TimeEntry>,
    breaks: HashMap<Uuid, BreakRecord>,
}

/// A [`TimeEntryStore`] holding every table in process memory.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Project;
/// use timesheet_engine::store::{MemoryStore, TimeEntryStore};
/// use chrono::Utc;
///
/// let store = MemoryStore::new();
/// let project = store.insert_project(Project::new("Internal Training", None, Utc::now()))?;
/// assert_eq!(store.find_project(project.id)?, Some(project));
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| EngineError::StoreError {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| EngineError::StoreError {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl TimeEntryStore for MemoryStore {
    fn insert_employee(&self, employee: Employee) -> EngineResult<Employee> {
        self.write()?
            .employees
            .insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn find_employee(&self, id: Uuid) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn find_employee_by_badge(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .values()
            .find(|e| e.employee_id == employee_id)
            .cloned())
    }

    fn find_employee_by_email(&self, email: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .values()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self.read()?.employees.values().cloned().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    fn insert_project(&self, project: Project) -> EngineResult<Project> {
        self.write()?.projects.insert(project.id, project.clone());
        Ok(project)
    }

    fn find_project(&self, id: Uuid) -> EngineResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    fn list_projects(&self) -> EngineResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.read()?.projects.values().cloned().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    fn delete_project(&self, id: Uuid) -> EngineResult<bool> {
        Ok(self.write()?.projects.remove(&id).is_some())
    }

    fn insert_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry> {
        self.write()?.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn insert_entry_unless_open(&self, entry: TimeEntry) -> EngineResult<TimeEntry> {
        let mut tables = self.write()?;
        let filter = EntryFilter::for_user(entry.user_id).on(entry.date).open_only();
        if let Some(existing) = tables.entries.values().find(|e| filter.matches(e)) {
            return Ok(existing.clone());
        }
        tables.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn update_entry(&self, entry: &TimeEntry) -> EngineResult<()> {
        let mut tables = self.write()?;
        let stored = tables
            .entries
            .get_mut(&entry.id)
            .ok_or_else(|| EngineError::TimeEntryNotFound {
                id: entry.id.to_string(),
            })?;
        *stored = entry.clone();
        Ok(())
    }

    fn find_entry(&self, id: Uuid) -> EngineResult<Option<TimeEntry>> {
        Ok(self.read()?.entries.get(&id).cloned())
    }

    fn query_entries(&self, filter: &EntryFilter) -> EngineResult<Vec<TimeEntry>> {
        let mut entries: Vec<TimeEntry> = self
            .read()?
            .entries
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.clock_in.cmp(&a.clock_in)));
        Ok(entries)
    }

    fn insert_break(&self, record: BreakRecord) -> EngineResult<BreakRecord> {
        self.write()?.breaks.insert(record.id, record.clone());
        Ok(record)
    }

    fn update_break(&self, record: &BreakRecord) -> EngineResult<()> {
        let mut tables = self.write()?;
        let stored = tables
            .breaks
            .get_mut(&record.id)
            .ok_or_else(|| EngineError::BreakNotFound {
                id: record.id.to_string(),
            })?;
        *stored = record.clone();
        Ok(())
    }

    fn find_break(&self, id: Uuid) -> EngineResult<Option<BreakRecord>> {
        Ok(self.read()?.breaks.get(&id).cloned())
    }

    fn active_break(&self, time_entry_id: Uuid) -> EngineResult<Option<BreakRecord>> {
        Ok(self
            .read()?
            .breaks
            .values()
            .find(|b| b.time_entry_id == time_entry_id && b.is_active())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, day, hour, 0, 0).unwrap()
    }

    fn employee(name: &str, badge: &str, email: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            employee_id: badge.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Employee,
            avatar_url: None,
            created_at: at(1, 8),
        }
    }

    #[test]
    fn test_employee_lookups() {
        let store = MemoryStore::new();
        let sam = store
            .insert_employee(employee("Sam", "EMP-002", "Sam@Example.com"))
            .unwrap();

        assert_eq!(store.find_employee(sam.id).unwrap(), Some(sam.clone()));
        assert_eq!(
            store.find_employee_by_badge("EMP-002").unwrap(),
            Some(sam.clone())
        );
        assert_eq!(
            store.find_employee_by_email("sam@example.com").unwrap(),
            Some(sam)
        );
        assert_eq!(store.find_employee_by_badge("EMP-999").unwrap(), None);
    }

    #[test]
    fn test_lists_are_sorted_by_name() {
        let store = MemoryStore::new();
        store
            .insert_employee(employee("Zoe", "EMP-3", "z@example.com"))
            .unwrap();
        store
            .insert_employee(employee("Abe", "EMP-4", "a@example.com"))
            .unwrap();

        let names: Vec<String> = store
            .list_employees()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Abe", "Zoe"]);
    }

    #[test]
    fn test_delete_project() {
        let store = MemoryStore::new();
        let project = store
            .insert_project(Project::new("Database Migration", None, at(1, 8)))
            .unwrap();

        assert!(store.delete_project(project.id).unwrap());
        assert!(!store.delete_project(project.id).unwrap());
        assert_eq!(store.find_project(project.id).unwrap(), None);
    }

    #[test]
    fn test_update_missing_entry_fails() {
        let store = MemoryStore::new();
        let entry = TimeEntry::start(Uuid::new_v4(), Uuid::new_v4(), at(1, 9));

        assert!(matches!(
            store.update_entry(&entry),
            Err(EngineError::TimeEntryNotFound { .. })
        ));
    }

    #[test]
    fn test_query_entries_newest_first() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let project = Uuid::new_v4();
        for day in [1, 3, 2] {
            store
                .insert_entry(TimeEntry::start(user, project, at(day, 9)))
                .unwrap();
        }
        store
            .insert_entry(TimeEntry::start(Uuid::new_v4(), project, at(4, 9)))
            .unwrap();

        let days: Vec<u32> = store
            .query_entries(&EntryFilter::for_user(user))
            .unwrap()
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(days, vec![3, 2, 1]);
    }

    #[test]
    fn test_insert_entry_unless_open_keeps_one_open_entry_per_day() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let project = Uuid::new_v4();

        let first = store
            .insert_entry_unless_open(TimeEntry::start(user, project, at(1, 9)))
            .unwrap();
        let second = store
            .insert_entry_unless_open(TimeEntry::start(user, project, at(1, 10)))
            .unwrap();
        assert_eq!(second, first);

        let next_day = store
            .insert_entry_unless_open(TimeEntry::start(user, project, at(2, 9)))
            .unwrap();
        assert_ne!(next_day.id, first.id);

        let mut closed = first.clone();
        closed.clock_out = Some(at(1, 17));
        store.update_entry(&closed).unwrap();
        let reopened = store
            .insert_entry_unless_open(TimeEntry::start(user, project, at(1, 18)))
            .unwrap();
        assert_ne!(reopened.id, first.id);
    }

    #[test]
    fn test_concurrent_inserts_leave_one_open_entry() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let project = Uuid::new_v4();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    store
                        .insert_entry_unless_open(TimeEntry::start(user, project, at(1, 9)))
                        .unwrap();
                });
            }
        });

        let open = store
            .query_entries(&EntryFilter::for_user(user).open_only())
            .unwrap();
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn test_active_break_lookup() {
        let store = MemoryStore::new();
        let entry_id = Uuid::new_v4();
        let mut record = store
            .insert_break(BreakRecord::start(entry_id, at(1, 12)))
            .unwrap();

        assert_eq!(store.active_break(entry_id).unwrap(), Some(record.clone()));

        record.end_time = Some(at(1, 13));
        store.update_break(&record).unwrap();
        assert_eq!(store.active_break(entry_id).unwrap(), None);
        assert_eq!(store.find_break(record.id).unwrap(), Some(record));
    }

    #[test]
    fn test_update_missing_break_fails() {
        let store = MemoryStore::new();
        let record = BreakRecord::start(Uuid::new_v4(), at(1, 12));
        assert!(matches!(
            store.update_break(&record),
            Err(EngineError::BreakNotFound { .. })
        ));
    }
}
