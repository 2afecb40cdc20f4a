//! Technology repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level CRUD over the `technologies` table.
//! - Provide parent-scoped queries for the ability -> technology edge,
//!   including the subject-rooted form used by two-level cascades.

use crate::model::ability::AbilityId;
use crate::model::subject::SubjectId;
use crate::model::technology::{Technology, TechnologyDraft, TechnologyId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TECHNOLOGY_SELECT_SQL: &str = "SELECT id, name, image, ability_id FROM technologies";

/// Repository interface for technology CRUD operations.
pub trait TechnologyRepository {
    /// Lists all technologies in insertion order.
    fn list(&self) -> RepoResult<Vec<Technology>>;
    /// Lists the technologies owned by one ability, insertion order.
    fn list_by_ability(&self, ability_id: AbilityId) -> RepoResult<Vec<Technology>>;
    /// Loads one technology by id.
    fn get(&self, id: TechnologyId) -> RepoResult<Option<Technology>>;
    /// Persists a new technology under `ability_id` and returns it with its id.
    fn create(&self, ability_id: AbilityId, draft: TechnologyDraft) -> RepoResult<Technology>;
    /// Replaces the stored fields of an existing technology. The owning
    /// ability never changes through update.
    fn update(&self, id: TechnologyId, draft: TechnologyDraft) -> RepoResult<Technology>;
    /// Removes one technology row.
    fn delete_row(&self, id: TechnologyId) -> RepoResult<()>;
    /// Removes every technology owned by `ability_id`, returning the count.
    fn delete_by_ability(&self, ability_id: AbilityId) -> RepoResult<usize>;
    /// Removes every technology reachable from `subject_id` through its
    /// abilities, returning the count. Used by subject cascade deletion.
    fn delete_by_subject(&self, subject_id: SubjectId) -> RepoResult<usize>;
}

/// SQLite-backed technology repository.
pub struct SqliteTechnologyRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTechnologyRepo<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["technologies", "abilities"])?;
        Ok(Self { conn })
    }
}

impl TechnologyRepository for SqliteTechnologyRepo<'_> {
    fn list(&self) -> RepoResult<Vec<Technology>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TECHNOLOGY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut technologies = Vec::new();
        while let Some(row) = rows.next()? {
            technologies.push(parse_technology_row(row)?);
        }
        Ok(technologies)
    }

    fn list_by_ability(&self, ability_id: AbilityId) -> RepoResult<Vec<Technology>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TECHNOLOGY_SELECT_SQL} WHERE ability_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([ability_id])?;
        let mut technologies = Vec::new();
        while let Some(row) = rows.next()? {
            technologies.push(parse_technology_row(row)?);
        }
        Ok(technologies)
    }

    fn get(&self, id: TechnologyId) -> RepoResult<Option<Technology>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TECHNOLOGY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_technology_row(row)?));
        }
        Ok(None)
    }

    fn create(&self, ability_id: AbilityId, draft: TechnologyDraft) -> RepoResult<Technology> {
        self.conn.execute(
            "INSERT INTO technologies (name, image, ability_id) VALUES (?1, ?2, ?3);",
            params![draft.name, draft.image, ability_id],
        )?;
        Ok(Technology::from_draft(
            self.conn.last_insert_rowid(),
            ability_id,
            draft,
        ))
    }

    fn update(&self, id: TechnologyId, draft: TechnologyDraft) -> RepoResult<Technology> {
        let ability_id: Option<AbilityId> = {
            let mut stmt = self
                .conn
                .prepare("SELECT ability_id FROM technologies WHERE id = ?1;")?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => Some(row.get(0)?),
                None => None,
            }
        };
        let Some(ability_id) = ability_id else {
            return Err(RepoError::NotFound {
                entity: "technology",
                id,
            });
        };

        self.conn.execute(
            "UPDATE technologies SET name = ?1, image = ?2 WHERE id = ?3;",
            params![draft.name, draft.image, id],
        )?;
        Ok(Technology::from_draft(id, ability_id, draft))
    }

    fn delete_row(&self, id: TechnologyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM technologies WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "technology",
                id,
            });
        }
        Ok(())
    }

    fn delete_by_ability(&self, ability_id: AbilityId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM technologies WHERE ability_id = ?1;",
            [ability_id],
        )?;
        Ok(changed)
    }

    fn delete_by_subject(&self, subject_id: SubjectId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM technologies
             WHERE ability_id IN (
                SELECT id FROM abilities WHERE subject_id = ?1
             );",
            [subject_id],
        )?;
        Ok(changed)
    }
}

fn parse_technology_row(row: &Row<'_>) -> RepoResult<Technology> {
    Ok(Technology {
        id: row.get("id")?,
        name: row.get("name")?,
        image: row.get("image")?,
        ability_id: row.get("ability_id")?,
    })
}
