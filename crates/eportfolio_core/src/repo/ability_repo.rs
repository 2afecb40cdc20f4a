//! Ability repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level CRUD over the `abilities` table.
//! - Provide parent-scoped queries for the subject -> ability ownership edge.
//!
//! # Invariants
//! - Every ability row references an existing subject; parent existence is
//!   checked by the service layer before `create` runs.
//! - `delete_by_subject` removes rows only; technology cascade is the
//!   service layer's transaction-scoped responsibility.

use crate::model::ability::{Ability, AbilityDraft, AbilityId};
use crate::model::subject::SubjectId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ABILITY_SELECT_SQL: &str = "SELECT id, name, color, image, subject_id FROM abilities";

/// Repository interface for ability CRUD operations.
pub trait AbilityRepository {
    /// Lists all abilities in insertion order, summary shape.
    fn list(&self) -> RepoResult<Vec<Ability>>;
    /// Lists the abilities owned by one subject, insertion order.
    fn list_by_subject(&self, subject_id: SubjectId) -> RepoResult<Vec<Ability>>;
    /// Loads one ability by id, summary shape.
    fn get(&self, id: AbilityId) -> RepoResult<Option<Ability>>;
    /// Persists a new ability under `subject_id` and returns it with its id.
    fn create(&self, subject_id: SubjectId, draft: AbilityDraft) -> RepoResult<Ability>;
    /// Replaces the stored fields of an existing ability. The owning subject
    /// never changes through update.
    fn update(&self, id: AbilityId, draft: AbilityDraft) -> RepoResult<Ability>;
    /// Removes one ability row. Owned technologies are the caller's
    /// responsibility.
    fn delete_row(&self, id: AbilityId) -> RepoResult<()>;
    /// Removes every ability row owned by `subject_id`, returning the count.
    fn delete_by_subject(&self, subject_id: SubjectId) -> RepoResult<usize>;
    /// Returns whether an ability row exists.
    fn exists(&self, id: AbilityId) -> RepoResult<bool>;
}

/// SQLite-backed ability repository.
pub struct SqliteAbilityRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAbilityRepo<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["abilities"])?;
        Ok(Self { conn })
    }
}

impl AbilityRepository for SqliteAbilityRepo<'_> {
    fn list(&self) -> RepoResult<Vec<Ability>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ABILITY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut abilities = Vec::new();
        while let Some(row) = rows.next()? {
            abilities.push(parse_ability_row(row)?);
        }
        Ok(abilities)
    }

    fn list_by_subject(&self, subject_id: SubjectId) -> RepoResult<Vec<Ability>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ABILITY_SELECT_SQL} WHERE subject_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([subject_id])?;
        let mut abilities = Vec::new();
        while let Some(row) = rows.next()? {
            abilities.push(parse_ability_row(row)?);
        }
        Ok(abilities)
    }

    fn get(&self, id: AbilityId) -> RepoResult<Option<Ability>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ABILITY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_ability_row(row)?));
        }
        Ok(None)
    }

    fn create(&self, subject_id: SubjectId, draft: AbilityDraft) -> RepoResult<Ability> {
        self.conn.execute(
            "INSERT INTO abilities (name, color, image, subject_id) VALUES (?1, ?2, ?3, ?4);",
            params![draft.name, draft.color, draft.image, subject_id],
        )?;
        Ok(Ability::from_draft(
            self.conn.last_insert_rowid(),
            subject_id,
            draft,
        ))
    }

    fn update(&self, id: AbilityId, draft: AbilityDraft) -> RepoResult<Ability> {
        let subject_id: Option<SubjectId> = {
            let mut stmt = self
                .conn
                .prepare("SELECT subject_id FROM abilities WHERE id = ?1;")?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => Some(row.get(0)?),
                None => None,
            }
        };
        let Some(subject_id) = subject_id else {
            return Err(RepoError::NotFound {
                entity: "ability",
                id,
            });
        };

        self.conn.execute(
            "UPDATE abilities SET name = ?1, color = ?2, image = ?3 WHERE id = ?4;",
            params![draft.name, draft.color, draft.image, id],
        )?;
        Ok(Ability::from_draft(id, subject_id, draft))
    }

    fn delete_row(&self, id: AbilityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM abilities WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "ability",
                id,
            });
        }
        Ok(())
    }

    fn delete_by_subject(&self, subject_id: SubjectId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM abilities WHERE subject_id = ?1;", [subject_id])?;
        Ok(changed)
    }

    fn exists(&self, id: AbilityId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM abilities WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_ability_row(row: &Row<'_>) -> RepoResult<Ability> {
    Ok(Ability {
        id: row.get("id")?,
        name: row.get("name")?,
        color: row.get("color")?,
        image: row.get("image")?,
        subject_id: row.get("subject_id")?,
        technologies: None,
    })
}
