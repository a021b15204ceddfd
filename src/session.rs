//! Signed-in user context.
//!
//! Authentication itself belongs to an [`IdentityProvider`]; the
//! [`SessionContext`] only tracks which employee profile the current session
//! belongs to and is passed explicitly to whatever needs it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::store::TimeEntryStore;

/// An authenticated session issued by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account the session belongs to.
    pub user_id: Uuid,
    /// Email the account signed in with.
    pub email: String,
    /// When the session was issued.
    pub signed_in_at: DateTime<Utc>,
}

/// Issues and revokes sessions.
pub trait IdentityProvider: Send + Sync {
    /// The session currently held, if any.
    fn current_session(&self) -> EngineResult<Option<Session>>;

    /// Verifies credentials and opens a session.
    ///
    /// Fails with `InvalidCredentials` on an unknown email or wrong password.
    fn authenticate(&self, email: &str, password: &str) -> EngineResult<Session>;

    /// Drops the current session.
    fn sign_out(&self) -> EngineResult<()>;

    /// Creates credentials for a new account.
    fn register(&self, email: &str, password: &str, user_id: Uuid) -> EngineResult<()>;
}

#[derive(Debug, Clone)]
struct Credential {
    user_id: Uuid,
    password: String,
}

/// In-process identity provider holding one session at a time.
pub struct MemoryIdentityProvider {
    credentials: RwLock<HashMap<String, Credential>>,
    session: RwLock<Option<Session>>,
    clock: Arc<dyn Clock>,
}

impl MemoryIdentityProvider {
    /// Creates a provider with no accounts, stamping sessions with the
    /// system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates a provider with no accounts that reads "now" from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
            session: RwLock::new(None),
            clock,
        }
    }
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> EngineError {
    EngineError::StoreError {
        message: "identity lock poisoned".to_string(),
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn current_session(&self) -> EngineResult<Option<Session>> {
        Ok(self.session.read().map_err(|_| poisoned())?.clone())
    }

    fn authenticate(&self, email: &str, password: &str) -> EngineResult<Session> {
        let key = email.to_lowercase();
        let credential = self
            .credentials
            .read()
            .map_err(|_| poisoned())?
            .get(&key)
            .cloned()
            .ok_or(EngineError::InvalidCredentials)?;

        if credential.password != password {
            return Err(EngineError::InvalidCredentials);
        }

        let session = Session {
            user_id: credential.user_id,
            email: key,
            signed_in_at: self.clock.utc(),
        };
        *self.session.write().map_err(|_| poisoned())? = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&self) -> EngineResult<()> {
        *self.session.write().map_err(|_| poisoned())? = None;
        Ok(())
    }

    fn register(&self, email: &str, password: &str, user_id: Uuid) -> EngineResult<()> {
        let mut credentials = self.credentials.write().map_err(|_| poisoned())?;
        let key = email.to_lowercase();
        if credentials.contains_key(&key) {
            return Err(EngineError::DuplicateEmployee {
                field: "email".to_string(),
                value: email.to_string(),
            });
        }
        credentials.insert(
            key,
            Credential {
                user_id,
                password: password.to_string(),
            },
        );
        Ok(())
    }
}

/// The signed-in employee, if any.
pub struct SessionContext<P, S> {
    provider: Arc<P>,
    store: Arc<S>,
    user: Option<Employee>,
}

impl<P: IdentityProvider, S: TimeEntryStore> SessionContext<P, S> {
    /// Creates a signed-out context.
    pub fn new(provider: Arc<P>, store: Arc<S>) -> Self {
        Self {
            provider,
            store,
            user: None,
        }
    }

    /// Restores the profile for a session the provider already holds.
    pub fn initialize(&mut self) -> EngineResult<Option<&Employee>> {
        self.user = match self.provider.current_session()? {
            Some(session) => {
                let profile = self.store.find_employee(session.user_id)?;
                if profile.is_none() {
                    warn!(user_id = %session.user_id, "Session has no matching profile");
                }
                profile
            }
            None => None,
        };
        debug!(authenticated = self.user.is_some(), "Session context initialized");
        Ok(self.user.as_ref())
    }

    /// The signed-in employee.
    pub fn current_user(&self) -> Option<&Employee> {
        self.user.as_ref()
    }

    /// Returns true if a profile is loaded.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Signs in with an email address or an employee badge number.
    ///
    /// A login without `@` is treated as a badge number and resolved to the
    /// employee's email before authenticating.
    pub fn sign_in(&mut self, login: &str, password: &str) -> EngineResult<&Employee> {
        let login = login.trim();
        let email = if login.contains('@') {
            login.to_string()
        } else {
            self.store
                .find_employee_by_badge(login)?
                .map(|employee| employee.email)
                .ok_or(EngineError::InvalidCredentials)?
        };

        let session = self.provider.authenticate(&email, password)?;
        let profile = self
            .store
            .find_employee(session.user_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: session.user_id.to_string(),
            })?;

        info!(user_id = %profile.id, role = profile.role.as_str(), "Signed in");
        Ok(&*self.user.insert(profile))
    }

    /// Ends the session.
    pub fn sign_out(&mut self) -> EngineResult<()> {
        self.provider.sign_out()?;
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    /// The signed-in employee, or `NotAuthenticated`.
    pub fn require_user(&self) -> EngineResult<&Employee> {
        self.user.as_ref().ok_or(EngineError::NotAuthenticated)
    }

    /// The signed-in administrator, or `Forbidden` naming the action.
    pub fn require_admin(&self, action: &str) -> EngineResult<&Employee> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(EngineError::Forbidden {
                action: action.to_string(),
            });
        }
        Ok(user)
    }
}
