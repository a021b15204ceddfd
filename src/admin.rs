//! Administrator operations on employees, projects and time entries.
//!
//! Every public operation takes the acting [`Employee`] and refuses with
//! `Forbidden` unless that employee is an administrator. Startup seeding from
//! configuration is the one exception.

use std::sync::Arc;

use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{ConfigLoader, ReportSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Project, Role, TimeEntry};
use crate::report::{CsvExport, employees_to_csv, export_filename};
use crate::session::IdentityProvider;
use crate::store::{EntryFilter, TimeEntryStore};

/// Details for a new employee account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Badge number, unique across employees.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Sign-in email, unique across employees.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Access level.
    #[serde(default)]
    pub role: Role,
    /// Profile picture.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Counts of records created by [`Administration::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Projects inserted.
    pub projects: usize,
    /// Accounts inserted.
    pub accounts: usize,
}

/// Administrator operations.
pub struct Administration<S, P> {
    store: Arc<S>,
    identity: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<S: TimeEntryStore, P: IdentityProvider> Administration<S, P> {
    /// Creates the service.
    pub fn new(store: Arc<S>, identity: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            identity,
            clock,
        }
    }

    /// Creates an employee profile and its sign-in credentials.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `actor` is not an administrator
    /// - `Validation` for a blank name, badge number or password, or an email without `@`
    /// - `DuplicateEmployee` if the email or badge number is taken
    pub fn register_employee(
        &self,
        actor: &Employee,
        new_employee: NewEmployee,
    ) -> EngineResult<Employee> {
        require_admin(actor, "register_employee")?;
        let employee = self.insert_account(new_employee)?;
        info!(
            actor = %actor.id,
            user_id = %employee.id,
            employee_id = %employee.employee_id,
            role = employee.role.as_str(),
            "Employee registered"
        );
        Ok(employee)
    }

    /// Creates a project.
    pub fn create_project(
        &self,
        actor: &Employee,
        name: &str,
        description: Option<String>,
    ) -> EngineResult<Project> {
        require_admin(actor, "create_project")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("name", "must not be blank"));
        }

        let description = description.filter(|d| !d.trim().is_empty());
        let project = self
            .store
            .insert_project(Project::new(name, description, self.clock.utc()))?;
        info!(
            actor = %actor.id,
            project_id = %project.id,
            name = %project.name,
            "Project created"
        );
        Ok(project)
    }

    /// Deletes a project that no time entry references.
    pub fn delete_project(&self, actor: &Employee, project_id: Uuid) -> EngineResult<()> {
        require_admin(actor, "delete_project")?;
        self.store
            .find_project(project_id)?
            .ok_or_else(|| EngineError::ProjectNotFound {
                id: project_id.to_string(),
            })?;

        let entry_count = self
            .store
            .query_entries(&EntryFilter::for_project(project_id))?
            .len();
        if entry_count > 0 {
            return Err(EngineError::ProjectInUse {
                project_id: project_id.to_string(),
                entry_count,
            });
        }

        self.store.delete_project(project_id)?;
        info!(actor = %actor.id, project_id = %project_id, "Project deleted");
        Ok(())
    }

    /// Time entries across all employees matching the filter, newest first.
    pub fn list_time_entries(
        &self,
        actor: &Employee,
        filter: &EntryFilter,
    ) -> EngineResult<Vec<TimeEntry>> {
        require_admin(actor, "list_time_entries")?;
        let entries = self.store.query_entries(filter)?;
        debug!(actor = %actor.id, count = entries.len(), "Listed time entries");
        Ok(entries)
    }

    /// Renders every employee profile as CSV, named for today's date.
    pub fn export_employees(
        &self,
        actor: &Employee,
        settings: &ReportSettings,
    ) -> EngineResult<CsvExport> {
        require_admin(actor, "export_employees")?;
        let employees = self.store.list_employees()?;
        let filename = export_filename(
            &settings.employees_filename_prefix,
            self.clock.utc().date_naive(),
        );
        info!(
            actor = %actor.id,
            count = employees.len(),
            filename = %filename,
            "Employees exported"
        );
        Ok(CsvExport {
            filename,
            content: employees_to_csv(&employees),
        })
    }

    /// Inserts the configured projects and accounts that do not exist yet.
    ///
    /// Projects are matched by name and accounts by email or badge number.
    pub fn seed(&self, config: &ConfigLoader) -> EngineResult<SeedOutcome> {
        let mut outcome = SeedOutcome::default();

        let existing: Vec<String> = self
            .store
            .list_projects()?
            .into_iter()
            .map(|project| project.name)
            .collect();
        for seed in config.seed_projects() {
            if existing.iter().any(|name| name == &seed.name) {
                continue;
            }
            self.store.insert_project(Project::new(
                seed.name.clone(),
                seed.description.clone(),
                self.clock.utc(),
            ))?;
            outcome.projects += 1;
        }

        for account in config.seed_accounts() {
            let taken = self.store.find_employee_by_email(&account.email)?.is_some()
                || self
                    .store
                    .find_employee_by_badge(&account.employee_id)?
                    .is_some();
            if taken {
                debug!(employee_id = %account.employee_id, "Seed account already present");
                continue;
            }
            self.insert_account(NewEmployee {
                employee_id: account.employee_id.clone(),
                name: account.name.clone(),
                email: account.email.clone(),
                password: account.password.clone(),
                role: account.role,
                avatar_url: None,
            })?;
            outcome.accounts += 1;
        }

        info!(
            projects = outcome.projects,
            accounts = outcome.accounts,
            "Seeded store from configuration"
        );
        Ok(outcome)
    }

    fn insert_account(&self, new_employee: NewEmployee) -> EngineResult<Employee> {
        let NewEmployee {
            employee_id,
            name,
            email,
            password,
            role,
            avatar_url,
        } = new_employee;

        let employee_id = employee_id.trim().to_string();
        let name = name.trim().to_string();
        let email = email.trim().to_string();

        if name.is_empty() {
            return Err(EngineError::validation("name", "must not be blank"));
        }
        if employee_id.is_empty() {
            return Err(EngineError::validation("employee_id", "must not be blank"));
        }
        if !email.contains('@') {
            return Err(EngineError::validation("email", "must be an email address"));
        }
        if password.is_empty() {
            return Err(EngineError::validation("password", "must not be blank"));
        }

        if self.store.find_employee_by_email(&email)?.is_some() {
            return Err(EngineError::DuplicateEmployee {
                field: "email".to_string(),
                value: email,
            });
        }
        if self.store.find_employee_by_badge(&employee_id)?.is_some() {
            return Err(EngineError::DuplicateEmployee {
                field: "employee_id".to_string(),
                value: employee_id,
            });
        }

        let employee = Employee {
            id: Uuid::new_v4(),
            employee_id,
            name,
            email,
            role,
            avatar_url,
            created_at: self.clock.utc(),
        };
        self.identity.register(&employee.email, &password, employee.id)?;
        self.store.insert_employee(employee)
    }
}

fn require_admin(actor: &Employee, action: &str) -> EngineResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(EngineError::Forbidden {
            action: action.to_string(),
        })
    }
}
