//! Authentication module
//!
//! Provides JWT session tokens, bcrypt password hashing and the
//! extractor guarding protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{AuthUser, AUTH_TOKEN_HEADER};
pub use password::PasswordService;
