//! In-process store implementing the same ports as the PostgreSQL adapters.
//!
//! Selected with `database.url = "memory://"`; also backs the HTTP tests.
//! Each write runs under a single lock, which gives it the same
//! all-or-nothing behaviour as a transaction and makes the unique-name check
//! atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use isupipe_core::domain::{NewUser, Session, User};
use isupipe_core::error::DomainError;
use isupipe_core::repositories::{SessionRepository, StoreHealth, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    user_ids_by_name: HashMap<String, i64>,
    sessions: HashMap<String, Session>,
    last_user_id: i64,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().users.len()
    }

    pub fn session_count(&self) -> usize {
        self.tables.lock().sessions.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.tables.lock().users.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.lock();
        Ok(tables
            .user_ids_by_name
            .get(name)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.lock();
        if tables.user_ids_by_name.contains_key(&user.name) {
            return Err(DomainError::NameAlreadyExists(user.name.clone()));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let stored = User {
            id: tables.last_user_id,
            name: user.name.clone(),
            display_name: user.display_name.clone(),
            description: user.description.clone(),
            password: user.password.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.user_ids_by_name.insert(stored.name.clone(), stored.id);
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        let mut tables = self.tables.lock();
        if tables.sessions.contains_key(&session.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate session id {}",
                session.id
            )));
        }
        tables.sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.tables.lock().sessions.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.tables.lock().sessions.remove(id);
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
