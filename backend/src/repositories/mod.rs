//! User persistence
//!
//! The services talk to storage through the [`UserStore`] trait.
//! [`PgUserRepository`] is the production implementation;
//! [`InMemoryUserRepository`] backs tests and local experiments.
//!
//! Implementations must reject a second user with the same email
//! atomically with [`StoreError::DuplicateEmail`]. Callers may check for an
//! existing email first, but that check is not a guarantee under
//! concurrent registrations.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::{NewUser, PgUserRepository, UserRecord};

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new user, failing with `DuplicateEmail` if the email is taken
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Cheap liveness probe used by the readiness endpoint
    async fn health_check(&self) -> Result<(), StoreError>;
}
