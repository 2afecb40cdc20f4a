//! Subject domain model.
//!
//! # Responsibility
//! - Define the root entity of the ownership chain.
//! - Carry detail-projection collections for owned abilities and projects.
//!
//! # Invariants
//! - `id` is assigned by the entity store and never reused.
//! - Deleting a subject deletes every owned ability (and transitively each
//!   ability's technologies) and every owned project.

use crate::model::ability::Ability;
use crate::model::project::Project;
use serde::{Deserialize, Serialize};

/// Stable identifier for a subject row.
pub type SubjectId = i64;

/// Root entity of the portfolio content graph.
///
/// `abilities` and `projects` are projection state, not storage state: list
/// endpoints serialize them as `null`, detail lookups fill them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub icon: String,
    pub image: String,
    /// Owned abilities in summary shape. `None` outside detail projections.
    #[serde(default)]
    pub abilities: Option<Vec<Ability>>,
    /// Owned projects. `None` outside detail projections.
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
}

/// Client-supplied subject fields. The server assigns `id`; any id present
/// in a request body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDraft {
    pub name: String,
    pub icon: String,
    pub image: String,
}

impl Subject {
    /// Builds the summary projection for a freshly assigned id.
    pub fn from_draft(id: SubjectId, draft: SubjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            icon: draft.icon,
            image: draft.image,
            abilities: None,
            projects: None,
        }
    }
}
