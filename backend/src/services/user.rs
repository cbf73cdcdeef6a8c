//! User service: registration, login and identity lookup
//!
//! Every store and hashing call is bounded by the configured timeouts;
//! a timeout is reported like any other internal failure.
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::config::TimeoutConfig;
use crate::error::ApiError;
use crate::repositories::{NewUser, UserStore};
use devconnector_shared::{
    avatar_url, normalize_email, validate_login, validate_registration, LoginRequest,
    RegisterRequest, UserProfile,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use uuid::Uuid;

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const DUMMY_PASSWORD: &str = "devconnector-dummy-password";

/// Await `fut`, failing with an internal error once `limit` elapses
async fn bounded<T, E, F>(limit: Duration, operation: &'static str, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, E>>,
    ApiError: From<E>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => Err(ApiError::Internal(anyhow::anyhow!(
            "{} timed out after {:?}",
            operation,
            limit
        ))),
    }
}

/// User service for authentication operations
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt: JwtService,
    passwords: PasswordService,
    timeouts: TimeoutConfig,
    /// Hash at the configured cost, verified against when a login email is unknown
    dummy_hash: Arc<OnceCell<String>>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt: JwtService,
        passwords: PasswordService,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            store,
            jwt,
            passwords,
            timeouts,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Register a new user and return a session token for them.
    ///
    /// Validation and the duplicate check happen before any write; the
    /// only mutation is the final insert.
    pub async fn register(&self, req: RegisterRequest) -> Result<String, ApiError> {
        let violations = validate_registration(&req);
        if !violations.is_empty() {
            return Err(ApiError::Validation(violations));
        }

        let email = normalize_email(&req.email);

        // Fast path only; the store's unique constraint is authoritative
        let existing = bounded(
            self.timeouts.store(),
            "user lookup by email",
            self.store.find_by_email(&email),
        )
        .await?;
        if existing.is_some() {
            warn!("Registration rejected: email already registered");
            return Err(ApiError::Conflict(USER_EXISTS.to_string()));
        }

        let avatar_url = avatar_url(&email);

        let password_hash = bounded(
            self.timeouts.hash(),
            "password hashing",
            self.passwords.hash_async(req.password),
        )
        .await?;

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            email,
            password_hash,
            avatar_url,
        };
        let user = match bounded(self.timeouts.store(), "user insert", self.store.create(new_user)).await {
            Ok(user) => user,
            Err(ApiError::Conflict(_)) => {
                warn!("Registration lost a race on the email unique constraint");
                return Err(ApiError::Conflict(USER_EXISTS.to_string()));
            }
            Err(e) => return Err(e),
        };

        let token = self.jwt.generate_token(user.id)?;

        info!(user_id = %user.id, "User registered");
        Ok(token)
    }

    /// Login with email and password
    ///
    /// Unknown emails and wrong passwords produce the same error, and both
    /// pay for one bcrypt verification.
    pub async fn login(&self, req: LoginRequest) -> Result<String, ApiError> {
        let violations = validate_login(&req);
        if !violations.is_empty() {
            return Err(ApiError::Validation(violations));
        }

        let email = normalize_email(&req.email);
        let user = bounded(
            self.timeouts.store(),
            "user lookup by email",
            self.store.find_by_email(&email),
        )
        .await?;

        let Some(user) = user else {
            self.verify_dummy(req.password).await?;
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS.to_string()));
        };

        let valid = bounded(
            self.timeouts.hash(),
            "password verification",
            self.passwords.verify_async(req.password, user.password_hash.clone()),
        )
        .await?;

        if !valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(ApiError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.jwt.generate_token(user.id)?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Verify `password` against a throwaway hash so that a miss costs
    /// as much as a wrong password
    async fn verify_dummy(&self, password: String) -> Result<(), ApiError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| {
                bounded(
                    self.timeouts.hash(),
                    "dummy password hashing",
                    self.passwords.hash_async(DUMMY_PASSWORD.to_string()),
                )
            })
            .await?
            .clone();

        bounded(
            self.timeouts.hash(),
            "password verification",
            self.passwords.verify_async(password, hash),
        )
        .await?;
        Ok(())
    }

    /// Profile of an authenticated user, without the password hash
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = bounded(self.timeouts.store(), "user lookup by id", self.store.find_by_id(user_id))
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(user.into_profile())
    }
}
