//! Input validation functions
//!
//! Field rules for the registration and login bodies. Every rule is checked
//! and all failures are reported together, in field order, so a client sees
//! every problem in one response.
//! Email syntax checks lean on the `validator` crate.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::types::{LoginRequest, RegisterRequest};

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_INVALID: &str = "Please include a valid email";
pub const PASSWORD_TOO_SHORT: &str = "Please enter a password with 6 or more characters";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// A single failed validation rule
///
/// `param`, `location` and `value` are only present for field violations;
/// conflicts and server errors carry just `msg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Violation {
    /// Violation of a request body field
    pub fn field(param: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: Some(param.to_string()),
            location: Some("body".to_string()),
            value: None,
        }
    }

    /// Echo the offending value back to the client.
    /// Never used for password fields.
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Free-standing message with no field attached
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
            location: None,
            value: None,
        }
    }
}

/// Validate that a name is present
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(NAME_REQUIRED.to_string());
    }
    Ok(())
}

/// Validate email format
///
/// Requires an RFC-shaped address whose domain has at least one dot,
/// so `user@localhost` is rejected.
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() || !email.validate_email() {
        return Err(EMAIL_INVALID.to_string());
    }
    let has_dotted_domain = email
        .rsplit_once('@')
        .map(|(_, domain)| {
            domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        })
        .unwrap_or(false);
    if !has_dotted_domain {
        return Err(EMAIL_INVALID.to_string());
    }
    Ok(())
}

/// Validate password length (counted in characters, not bytes)
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT.to_string());
    }
    Ok(())
}

/// Apply the registration rules to a request body.
///
/// Returns an empty vector when the body is valid.
pub fn validate_registration(req: &RegisterRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Err(msg) = validate_name(&req.name) {
        violations.push(Violation::field("name", &msg).with_value(&req.name));
    }
    if let Err(msg) = validate_email(&req.email) {
        violations.push(Violation::field("email", &msg).with_value(&req.email));
    }
    if let Err(msg) = validate_password(&req.password) {
        violations.push(Violation::field("password", &msg));
    }

    violations
}

/// Apply the login rules: a valid email and a non-empty password.
pub fn validate_login(req: &LoginRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Err(msg) = validate_email(&req.email) {
        violations.push(Violation::field("email", &msg).with_value(&req.email));
    }
    if req.password.is_empty() {
        violations.push(Violation::field("password", PASSWORD_REQUIRED));
    }

    violations
}

/// Canonical form of an email address used for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
