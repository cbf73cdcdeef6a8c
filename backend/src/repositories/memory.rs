//! In-memory user store
//!
//! Enforces email uniqueness under a single lock, so concurrent inserts of
//! the same email behave like the database's unique constraint.

use super::{NewUser, StoreError, UserRecord, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserRecord>,
    by_email: HashMap<String, Uuid>,
}

/// Map-backed [`UserStore`]
#[derive(Default)]
pub struct InMemoryUserRepository {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the backend were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users
    ///
    /// Reads through a poisoned lock so the count is never understated.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .users
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("in-memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        if tables.by_email.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar_url: user.avatar_url,
            created_at: Utc::now(),
        };
        tables.by_email.insert(record.email.clone(), record.id);
        tables.users.insert(record.id, record.clone());

        Ok(record)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
