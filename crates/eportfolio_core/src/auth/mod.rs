//! Credential verification and bearer token issuance.
//!
//! # Responsibility
//! - Validate a login request against the stored credential row.
//! - Issue and verify signed, expiring bearer tokens.
//!
//! # Invariants
//! - Unknown username and wrong password produce the same error, so a login
//!   response never reveals which part was wrong.
//! - Token verification is pure given the secret; no per-request state.
//! - Signature comparison is constant-time (`Mac::verify_slice`).
//! - Passwords, hashes and signatures are never logged.

use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use hmac::{Hmac, Mac};
use log::{info, warn};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::Write as FmtWrite;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

pub type AuthResult<T> = Result<T, AuthError>;

/// Errors surfaced by the credential verifier.
#[derive(Debug)]
pub enum AuthError {
    /// Login failed: unknown username or wrong password.
    InvalidCredentials,
    /// Token missing, malformed, expired, or failing signature verification.
    Unauthenticated,
    /// Credential store failure during lookup.
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Stateless verifier over a signing secret and a token lifetime.
///
/// Token wire format: `username:expiry:signature` where `expiry` is epoch
/// seconds and `signature` is lowercase-hex HMAC-SHA256 over
/// `username:expiry`.
pub struct CredentialVerifier {
    secret: Vec<u8>,
    token_ttl_secs: u64,
}

impl CredentialVerifier {
    /// Creates a verifier from a signing secret and token lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, token_ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs,
        }
    }

    /// Validates `username`/`password` against the stored credential and
    /// issues a bearer token on success.
    ///
    /// # Errors
    /// - `InvalidCredentials` when the username is unknown or the password
    ///   digest does not match the stored hash.
    pub fn login(
        &self,
        users: &dyn UserRepository,
        username: &str,
        password: &str,
    ) -> AuthResult<String> {
        let Some(credential) = users.find_by_username(username)? else {
            warn!("event=login module=auth status=denied reason=unknown_user");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &credential.password_hash) {
            warn!("event=login module=auth status=denied reason=bad_password");
            return Err(AuthError::InvalidCredentials);
        }

        info!("event=login module=auth status=ok username={username}");
        Ok(self.issue_token_at(username, unix_now() + self.token_ttl_secs))
    }

    /// Verifies a bearer token and returns the embedded username.
    ///
    /// # Errors
    /// - `Unauthenticated` when the token is malformed, expired, or its
    ///   signature does not verify.
    pub fn verify(&self, token: &str) -> AuthResult<String> {
        self.verify_at(token, unix_now())
    }

    /// Issues a token with an explicit expiry. Split out so expiry behavior
    /// is testable without sleeping.
    fn issue_token_at(&self, username: &str, expires_at: u64) -> String {
        let payload = format!("{username}:{expires_at}");
        let signature = hex_encode(&self.sign(payload.as_bytes()));
        format!("{payload}:{signature}")
    }

    fn verify_at(&self, token: &str, now: u64) -> AuthResult<String> {
        // rsplitn keeps usernames containing `:` intact.
        let mut parts = token.rsplitn(3, ':');
        let (Some(signature_hex), Some(expiry_text), Some(username)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Unauthenticated);
        };
        if username.is_empty() {
            return Err(AuthError::Unauthenticated);
        }

        let expires_at: u64 = expiry_text
            .parse()
            .map_err(|_| AuthError::Unauthenticated)?;
        let signature = hex_decode(signature_hex).ok_or(AuthError::Unauthenticated)?;

        let payload = format!("{username}:{expires_at}");
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| AuthError::Unauthenticated)?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::Unauthenticated)?;

        if expires_at <= now {
            return Err(AuthError::Unauthenticated);
        }

        Ok(username.to_string())
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(mac) => mac,
            // HMAC accepts keys of any length; new_from_slice cannot fail.
            Err(_) => unreachable!("HMAC-SHA256 accepts any key length"),
        };
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Digests a plaintext password into the stored hash representation.
///
/// The concrete scheme is an opaque collaborator behind this seam; the rest
/// of the system only compares stored and derived hashes.
pub fn hash_password(password: &str) -> String {
    hex_encode(&Sha256::digest(password.as_bytes()))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash.trim().to_ascii_lowercase()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn hex_decode(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|index| u8::from_str_radix(text.get(index..index + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{hash_password, hex_decode, hex_encode, AuthError, CredentialVerifier};

    #[test]
    fn hex_roundtrip() {
        let bytes = [1u8, 2, 3, 10, 15, 255];
        let encoded = hex_encode(&bytes);
        assert_eq!(encoded, "0102030a0fff");
        assert_eq!(hex_decode(&encoded).unwrap(), bytes);
        assert!(hex_decode("abc").is_none());
        assert!(hex_decode("zz").is_none());
    }

    #[test]
    fn issued_token_verifies_and_embeds_username() {
        let verifier = CredentialVerifier::new("unit secret", 3600);
        let token = verifier.issue_token_at("John Shepard", 2_000_000_000);
        assert_eq!(
            verifier.verify_at(&token, 1_000_000_000).unwrap(),
            "John Shepard"
        );
    }

    #[test]
    fn username_with_separator_survives_roundtrip() {
        let verifier = CredentialVerifier::new("unit secret", 3600);
        let token = verifier.issue_token_at("a:b:c", 2_000_000_000);
        assert_eq!(verifier.verify_at(&token, 1_000_000_000).unwrap(), "a:b:c");
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = CredentialVerifier::new("unit secret", 3600);
        let token = verifier.issue_token_at("user", 1_000);
        assert!(matches!(
            verifier.verify_at(&token, 1_000),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let verifier = CredentialVerifier::new("unit secret", 3600);
        let token = verifier.issue_token_at("user", 2_000_000_000);
        let tampered = token.replacen("user", "root", 1);
        assert!(matches!(
            verifier.verify_at(&tampered, 1_000_000_000),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let verifier = CredentialVerifier::new("unit secret", 3600);
        let other = CredentialVerifier::new("other secret", 3600);
        let token = other.issue_token_at("user", 2_000_000_000);
        assert!(matches!(
            verifier.verify_at(&token, 1_000_000_000),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let verifier = CredentialVerifier::new("unit secret", 3600);
        for token in ["", "no-separators", "a:b", ":123:aa", "user:nan:aa"] {
            assert!(
                matches!(
                    verifier.verify_at(token, 1_000),
                    Err(AuthError::Unauthenticated)
                ),
                "token `{token}` should be rejected"
            );
        }
    }

    #[test]
    fn password_hash_is_stable_lowercase_hex() {
        let hash = hash_password("wrex");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash.to_ascii_lowercase());
        assert_eq!(hash, hash_password("wrex"));
        assert_ne!(hash, hash_password("grunt"));
    }
}
