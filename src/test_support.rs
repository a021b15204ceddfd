//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::models::{Employee, Project, Role};
use crate::store::{MemoryStore, TimeEntryStore};

/// A clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        *self.0.lock().unwrap() += delta;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, day, hour, minute, 0).unwrap()
}

pub fn employee(name: &str, badge: &str, email: &str, role: Role) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        employee_id: badge.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar_url: None,
        created_at: at(1, 8, 0),
    }
}

/// A store holding one employee and one project.
pub fn seeded_store() -> (Arc<MemoryStore>, Employee, Project) {
    let store = Arc::new(MemoryStore::new());
    let worker = store
        .insert_employee(employee(
            "Sam Worker",
            "EMP-001",
            "sam@example.com",
            Role::Employee,
        ))
        .unwrap();
    let project = store
        .insert_project(Project::new("Website Redesign", None, at(1, 8, 0)))
        .unwrap();
    (store, worker, project)
}
