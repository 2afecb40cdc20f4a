//! Stored login credential.
//!
//! # Invariants
//! - Exactly one row is consulted per login attempt (username is the key).
//! - `Credential` deliberately does not implement `Serialize`: the password
//!   hash must never appear in any response body.

/// Username/password-hash pair consulted by the credential verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
}
