//! Avatar URL derivation
//!
//! Avatars are Gravatar images keyed by a hash of the normalized email.
//! Derivation is pure: no request is made to Gravatar, clients resolve
//! the URL themselves and get the "mystery person" image when the address
//! has no Gravatar account.

use sha2::{Digest, Sha256};

use crate::validation::normalize_email;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Image size in pixels, max rating, default image
const GRAVATAR_PARAMS: &str = "s=200&r=pg&d=mm";

/// Derive the avatar URL for an email address
pub fn avatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!("{}/{}?{}", GRAVATAR_BASE, hex::encode(digest), GRAVATAR_PARAMS)
}
