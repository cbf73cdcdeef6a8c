//! DevConnector Shared Library
//!
//! This crate contains the request/response types and the pure helpers
//! (input validation, avatar derivation) used by the backend.

pub mod avatar;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use avatar::avatar_url;
pub use types::*;
pub use validation::{normalize_email, validate_login, validate_registration, Violation};
