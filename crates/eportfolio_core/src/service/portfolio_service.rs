//! Portfolio resource service.
//!
//! # Responsibility
//! - Enforce the subject -> ability -> technology ownership chain, plus the
//!   subject -> project edge.
//! - Run nested creation and cascade deletion inside single transactions.
//! - Attach child collections for detail projections; leave list projections
//!   in summary shape.
//!
//! # Invariants
//! - `update_*` requires prior existence; update is never upsert.
//! - Deleting a parent is all-or-nothing: either every descendant row and the
//!   parent row are gone, or none are.
//! - Existence of a parent is re-checked inside the same transaction that
//!   inserts or deletes children, so concurrent deletes cannot orphan rows.

use crate::model::ability::{Ability, AbilityDraft, AbilityId};
use crate::model::project::{Project, ProjectDraft, ProjectId};
use crate::model::subject::{Subject, SubjectDraft, SubjectId};
use crate::model::technology::{Technology, TechnologyDraft, TechnologyId};
use crate::repo::ability_repo::{AbilityRepository, SqliteAbilityRepo};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepo};
use crate::repo::subject_repo::{SqliteSubjectRepo, SubjectRepository};
use crate::repo::technology_repo::{SqliteTechnologyRepo, TechnologyRepository};
use crate::repo::RepoError;
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by resource service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced entity does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Resource service over one migrated connection.
///
/// Holds no state beyond the borrowed connection; one instance per request
/// is the expected usage.
pub struct PortfolioService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> PortfolioService<'conn> {
    /// Creates a service over a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    // --- subjects ---

    /// Lists all subjects in summary shape (no child collections).
    pub fn list_subjects(&self) -> ServiceResult<Vec<Subject>> {
        Ok(SqliteSubjectRepo::try_new(self.conn)?.list()?)
    }

    /// Loads one subject in detail shape: owned abilities (summary) and
    /// projects attached.
    pub fn get_subject(&self, id: SubjectId) -> ServiceResult<Subject> {
        let mut subject = SqliteSubjectRepo::try_new(self.conn)?
            .get(id)?
            .ok_or(ServiceError::NotFound {
                entity: "subject",
                id,
            })?;
        subject.abilities = Some(SqliteAbilityRepo::try_new(self.conn)?.list_by_subject(id)?);
        subject.projects = Some(SqliteProjectRepo::try_new(self.conn)?.list_by_subject(id)?);
        Ok(subject)
    }

    /// Creates a subject with a store-assigned id.
    pub fn create_subject(&self, draft: SubjectDraft) -> ServiceResult<Subject> {
        let subject = SqliteSubjectRepo::try_new(self.conn)?.create(draft)?;
        info!(
            "event=subject_create module=service status=ok id={}",
            subject.id
        );
        Ok(subject)
    }

    /// Updates an existing subject; fails with `NotFound` when `id` is absent.
    pub fn update_subject(&self, id: SubjectId, draft: SubjectDraft) -> ServiceResult<Subject> {
        Ok(SqliteSubjectRepo::try_new(self.conn)?.update(id, draft)?)
    }

    /// Deletes a subject and every descendant row (technologies, abilities,
    /// projects) in one transaction.
    pub fn delete_subject(&self, id: SubjectId) -> ServiceResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !SqliteSubjectRepo::try_new(&tx)?.exists(id)? {
            return Err(ServiceError::NotFound {
                entity: "subject",
                id,
            });
        }

        let technologies = SqliteTechnologyRepo::try_new(&tx)?.delete_by_subject(id)?;
        let abilities = SqliteAbilityRepo::try_new(&tx)?.delete_by_subject(id)?;
        let projects = SqliteProjectRepo::try_new(&tx)?.delete_by_subject(id)?;
        SqliteSubjectRepo::try_new(&tx)?.delete_row(id)?;
        tx.commit()?;

        info!(
            "event=subject_delete module=service status=ok id={id} \
             cascaded_abilities={abilities} cascaded_technologies={technologies} \
             cascaded_projects={projects}"
        );
        Ok(())
    }

    /// Creates an ability under `subject_id`. Parent existence check and
    /// child insert share one transaction, so a concurrent subject delete
    /// cannot leave an orphaned ability.
    pub fn add_ability(&self, subject_id: SubjectId, draft: AbilityDraft) -> ServiceResult<Ability> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !SqliteSubjectRepo::try_new(&tx)?.exists(subject_id)? {
            return Err(ServiceError::NotFound {
                entity: "subject",
                id: subject_id,
            });
        }
        let ability = SqliteAbilityRepo::try_new(&tx)?.create(subject_id, draft)?;
        tx.commit()?;

        info!(
            "event=ability_create module=service status=ok id={} subject_id={subject_id}",
            ability.id
        );
        Ok(ability)
    }

    /// Creates a project under `subject_id`; same transaction shape as
    /// `add_ability`.
    pub fn add_project(&self, subject_id: SubjectId, draft: ProjectDraft) -> ServiceResult<Project> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !SqliteSubjectRepo::try_new(&tx)?.exists(subject_id)? {
            return Err(ServiceError::NotFound {
                entity: "subject",
                id: subject_id,
            });
        }
        let project = SqliteProjectRepo::try_new(&tx)?.create(subject_id, draft)?;
        tx.commit()?;

        info!(
            "event=project_create module=service status=ok id={} subject_id={subject_id}",
            project.id
        );
        Ok(project)
    }

    // --- abilities ---

    /// Lists all abilities in summary shape (`technologies` stays `None`).
    pub fn list_abilities(&self) -> ServiceResult<Vec<Ability>> {
        Ok(SqliteAbilityRepo::try_new(self.conn)?.list()?)
    }

    /// Loads one ability in detail shape with its technologies attached.
    pub fn get_ability(&self, id: AbilityId) -> ServiceResult<Ability> {
        let mut ability = SqliteAbilityRepo::try_new(self.conn)?
            .get(id)?
            .ok_or(ServiceError::NotFound {
                entity: "ability",
                id,
            })?;
        ability.technologies = Some(SqliteTechnologyRepo::try_new(self.conn)?.list_by_ability(id)?);
        Ok(ability)
    }

    /// Updates an existing ability; fails with `NotFound` when `id` is absent.
    pub fn update_ability(&self, id: AbilityId, draft: AbilityDraft) -> ServiceResult<Ability> {
        Ok(SqliteAbilityRepo::try_new(self.conn)?.update(id, draft)?)
    }

    /// Deletes an ability and its technologies in one transaction.
    pub fn delete_ability(&self, id: AbilityId) -> ServiceResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let technologies = SqliteTechnologyRepo::try_new(&tx)?.delete_by_ability(id)?;
        SqliteAbilityRepo::try_new(&tx)?.delete_row(id)?;
        tx.commit()?;

        info!(
            "event=ability_delete module=service status=ok id={id} \
             cascaded_technologies={technologies}"
        );
        Ok(())
    }

    /// Creates a technology under `ability_id`; same transaction shape as
    /// `add_ability` one level down.
    pub fn add_technology(
        &self,
        ability_id: AbilityId,
        draft: TechnologyDraft,
    ) -> ServiceResult<Technology> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !SqliteAbilityRepo::try_new(&tx)?.exists(ability_id)? {
            return Err(ServiceError::NotFound {
                entity: "ability",
                id: ability_id,
            });
        }
        let technology = SqliteTechnologyRepo::try_new(&tx)?.create(ability_id, draft)?;
        tx.commit()?;

        info!(
            "event=technology_create module=service status=ok id={} ability_id={ability_id}",
            technology.id
        );
        Ok(technology)
    }

    // --- technologies ---

    /// Lists all technologies in insertion order.
    pub fn list_technologies(&self) -> ServiceResult<Vec<Technology>> {
        Ok(SqliteTechnologyRepo::try_new(self.conn)?.list()?)
    }

    /// Loads one technology by id.
    pub fn get_technology(&self, id: TechnologyId) -> ServiceResult<Technology> {
        SqliteTechnologyRepo::try_new(self.conn)?
            .get(id)?
            .ok_or(ServiceError::NotFound {
                entity: "technology",
                id,
            })
    }

    /// Updates an existing technology; fails with `NotFound` when absent.
    pub fn update_technology(
        &self,
        id: TechnologyId,
        draft: TechnologyDraft,
    ) -> ServiceResult<Technology> {
        Ok(SqliteTechnologyRepo::try_new(self.conn)?.update(id, draft)?)
    }

    /// Deletes one technology row; leaf entity, nothing cascades.
    pub fn delete_technology(&self, id: TechnologyId) -> ServiceResult<()> {
        SqliteTechnologyRepo::try_new(self.conn)?.delete_row(id)?;
        info!("event=technology_delete module=service status=ok id={id}");
        Ok(())
    }

    // --- projects ---

    /// Lists all projects in insertion order.
    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(SqliteProjectRepo::try_new(self.conn)?.list()?)
    }

    /// Loads one project by id.
    pub fn get_project(&self, id: ProjectId) -> ServiceResult<Project> {
        SqliteProjectRepo::try_new(self.conn)?
            .get(id)?
            .ok_or(ServiceError::NotFound {
                entity: "project",
                id,
            })
    }

    /// Updates an existing project; fails with `NotFound` when absent.
    pub fn update_project(&self, id: ProjectId, draft: ProjectDraft) -> ServiceResult<Project> {
        Ok(SqliteProjectRepo::try_new(self.conn)?.update(id, draft)?)
    }

    /// Deletes one project row; flat entity, nothing cascades.
    pub fn delete_project(&self, id: ProjectId) -> ServiceResult<()> {
        SqliteProjectRepo::try_new(self.conn)?.delete_row(id)?;
        info!("event=project_delete module=service status=ok id={id}");
        Ok(())
    }
}
