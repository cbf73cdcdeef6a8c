//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the credential store, the password hasher and the token issuer.

pub mod user;

pub use user::UserService;
