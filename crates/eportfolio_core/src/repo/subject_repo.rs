//! Subject repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level CRUD over the `subjects` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `list` returns rows in insertion order (`id ASC`).
//! - Mutations affecting zero rows surface `NotFound` rather than silently
//!   succeeding.

use crate::model::subject::{Subject, SubjectDraft, SubjectId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const SUBJECT_SELECT_SQL: &str = "SELECT id, name, icon, image FROM subjects";

/// Repository interface for subject CRUD operations.
pub trait SubjectRepository {
    /// Lists all subjects in insertion order, summary shape.
    fn list(&self) -> RepoResult<Vec<Subject>>;
    /// Loads one subject by id, summary shape.
    fn get(&self, id: SubjectId) -> RepoResult<Option<Subject>>;
    /// Persists a new subject and returns it with its assigned id.
    fn create(&self, draft: SubjectDraft) -> RepoResult<Subject>;
    /// Replaces the stored fields of an existing subject.
    fn update(&self, id: SubjectId, draft: SubjectDraft) -> RepoResult<Subject>;
    /// Removes one subject row. Owned rows are the caller's responsibility.
    fn delete_row(&self, id: SubjectId) -> RepoResult<()>;
    /// Returns whether a subject row exists.
    fn exists(&self, id: SubjectId) -> RepoResult<bool>;
}

/// SQLite-backed subject repository.
pub struct SqliteSubjectRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSubjectRepo<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["subjects"])?;
        Ok(Self { conn })
    }
}

impl SubjectRepository for SqliteSubjectRepo<'_> {
    fn list(&self) -> RepoResult<Vec<Subject>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUBJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut subjects = Vec::new();
        while let Some(row) = rows.next()? {
            subjects.push(parse_subject_row(row)?);
        }
        Ok(subjects)
    }

    fn get(&self, id: SubjectId) -> RepoResult<Option<Subject>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUBJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_subject_row(row)?));
        }
        Ok(None)
    }

    fn create(&self, draft: SubjectDraft) -> RepoResult<Subject> {
        self.conn.execute(
            "INSERT INTO subjects (name, icon, image) VALUES (?1, ?2, ?3);",
            params![draft.name, draft.icon, draft.image],
        )?;
        Ok(Subject::from_draft(self.conn.last_insert_rowid(), draft))
    }

    fn update(&self, id: SubjectId, draft: SubjectDraft) -> RepoResult<Subject> {
        let changed = self.conn.execute(
            "UPDATE subjects SET name = ?1, icon = ?2, image = ?3 WHERE id = ?4;",
            params![draft.name, draft.icon, draft.image, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "subject",
                id,
            });
        }
        Ok(Subject::from_draft(id, draft))
    }

    fn delete_row(&self, id: SubjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM subjects WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "subject",
                id,
            });
        }
        Ok(())
    }

    fn exists(&self, id: SubjectId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_subject_row(row: &Row<'_>) -> RepoResult<Subject> {
    Ok(Subject {
        id: row.get("id")?,
        name: row.get("name")?,
        icon: row.get("icon")?,
        image: row.get("image")?,
        abilities: None,
        projects: None,
    })
}
