//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//! Everything in it is built once at startup and read-only afterwards.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use crate::repositories::UserStore;
use crate::services::UserService;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`s or wrap `Arc`s, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub store: Arc<dyn UserStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Registration, login and profile workflows
    pub users: UserService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret, so call this once
    /// at startup.
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.expiry_secs);
        let passwords = PasswordService::new(config.password.bcrypt_cost);
        let users = UserService::new(
            store.clone(),
            jwt.clone(),
            passwords,
            config.timeouts.clone(),
        );

        Self {
            store,
            config: Arc::new(config),
            jwt,
            users,
        }
    }

    /// Get a reference to the credential store
    #[inline]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the user service
    #[inline]
    pub fn users(&self) -> &UserService {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryUserRepository;

    #[test]
    fn test_jwt_service_uses_configured_expiry() {
        let mut config = AppConfig::default();
        config.jwt.expiry_secs = 120;
        let state = AppState::new(Arc::new(InMemoryUserRepository::new()), config);

        assert_eq!(state.jwt().expiry_secs(), 120);
        let token = state.jwt().generate_token(uuid::Uuid::new_v4()).unwrap();
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_state_clones_share_store() {
        let store = Arc::new(InMemoryUserRepository::new());
        let state = AppState::new(store.clone(), AppConfig::default());
        let cloned = state.clone();

        assert!(cloned.store().health_check().await.is_ok());
        store.set_unavailable(true);
        assert!(state.store().health_check().await.is_err());
    }
}
