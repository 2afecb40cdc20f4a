//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level CRUD over the `projects` table.
//! - Provide parent-scoped queries for the subject -> project edge.

use crate::model::project::{Project, ProjectDraft, ProjectId};
use crate::model::subject::SubjectId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT id, name, description, image, subject_id FROM projects";

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    /// Lists all projects in insertion order.
    fn list(&self) -> RepoResult<Vec<Project>>;
    /// Lists the projects owned by one subject, insertion order.
    fn list_by_subject(&self, subject_id: SubjectId) -> RepoResult<Vec<Project>>;
    /// Loads one project by id.
    fn get(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Persists a new project under `subject_id` and returns it with its id.
    fn create(&self, subject_id: SubjectId, draft: ProjectDraft) -> RepoResult<Project>;
    /// Replaces the stored fields of an existing project. The owning subject
    /// never changes through update.
    fn update(&self, id: ProjectId, draft: ProjectDraft) -> RepoResult<Project>;
    /// Removes one project row.
    fn delete_row(&self, id: ProjectId) -> RepoResult<()>;
    /// Removes every project owned by `subject_id`, returning the count.
    fn delete_by_subject(&self, subject_id: SubjectId) -> RepoResult<usize>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepo<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepo<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["projects"])?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepo<'_> {
    fn list(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn list_by_subject(&self, subject_id: SubjectId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} WHERE subject_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([subject_id])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn get(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn create(&self, subject_id: SubjectId, draft: ProjectDraft) -> RepoResult<Project> {
        self.conn.execute(
            "INSERT INTO projects (name, description, image, subject_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![draft.name, draft.description, draft.image, subject_id],
        )?;
        Ok(Project::from_draft(
            self.conn.last_insert_rowid(),
            subject_id,
            draft,
        ))
    }

    fn update(&self, id: ProjectId, draft: ProjectDraft) -> RepoResult<Project> {
        let subject_id: Option<SubjectId> = {
            let mut stmt = self
                .conn
                .prepare("SELECT subject_id FROM projects WHERE id = ?1;")?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => Some(row.get(0)?),
                None => None,
            }
        };
        let Some(subject_id) = subject_id else {
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        };

        self.conn.execute(
            "UPDATE projects SET name = ?1, description = ?2, image = ?3 WHERE id = ?4;",
            params![draft.name, draft.description, draft.image, id],
        )?;
        Ok(Project::from_draft(id, subject_id, draft))
    }

    fn delete_row(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        }
        Ok(())
    }

    fn delete_by_subject(&self, subject_id: SubjectId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE subject_id = ?1;", [subject_id])?;
        Ok(changed)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        image: row.get("image")?,
        subject_id: row.get("subject_id")?,
    })
}
