//! Project domain model.
//!
//! # Invariants
//! - A project belongs to exactly one subject (`subject_id`).
//! - Deleted whenever its owning subject is deleted; has no children of its own.

use crate::model::subject::SubjectId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a project row.
pub type ProjectId = i64;

/// Flat child entity attached directly to one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub subject_id: SubjectId,
}

/// Client-supplied project fields; the owning subject comes from the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl Project {
    /// Builds the stored shape for a freshly assigned id.
    pub fn from_draft(id: ProjectId, subject_id: SubjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            image: draft.image,
            subject_id,
        }
    }
}
