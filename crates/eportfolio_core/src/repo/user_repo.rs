//! Credential repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Look up the stored credential consulted by the verifier at login.
//! - Seed/replace the credential row at process startup.
//!
//! # Invariants
//! - `username` is the primary key; at most one row per username.
//! - The password hash never leaves the repo/auth boundary.

use crate::model::user::Credential;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for stored login credentials.
pub trait UserRepository {
    /// Loads the credential row for `username`, if present.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Credential>>;
    /// Inserts or replaces the credential row for `credential.username`.
    fn upsert(&self, credential: &Credential) -> RepoResult<()>;
}

/// SQLite-backed credential repository.
pub struct SqliteUserRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepo<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepo<'_> {
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Credential>> {
        let credential = self
            .conn
            .query_row(
                "SELECT username, password_hash FROM users WHERE username = ?1;",
                [username],
                |row| {
                    Ok(Credential {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(credential)
    }

    fn upsert(&self, credential: &Credential) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO users (username, password_hash) VALUES (?1, ?2);",
            params![credential.username, credential.password_hash],
        )?;
        Ok(())
    }
}
