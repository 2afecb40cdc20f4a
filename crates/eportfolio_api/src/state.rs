//! Shared application state.
//!
//! # Invariants
//! - The SQLite connection is guarded by one mutex; conflicting writes are
//!   serialized, so concurrent nested creates cannot lose rows.
//! - Handlers must not hold the connection guard across awaits; every core
//!   operation is synchronous and short.

use eportfolio_core::CredentialVerifier;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-wide state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    verifier: Arc<CredentialVerifier>,
}

impl AppState {
    /// Wraps an already-migrated connection and a configured verifier.
    pub fn new(conn: Connection, verifier: CredentialVerifier) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            verifier: Arc::new(verifier),
        }
    }

    /// Acquires the connection guard, recovering from a poisoned mutex: a
    /// panicking handler cannot leave the store permanently unusable.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        match self.db.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns the credential verifier.
    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }
}
