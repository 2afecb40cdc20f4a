//! Ability domain model.
//!
//! # Invariants
//! - An ability cannot exist without an owning subject (`subject_id`).
//! - `technologies` is `None` in list projections and populated by detail
//!   lookups; the stored row always keeps its full child set via foreign keys.

use crate::model::subject::SubjectId;
use crate::model::technology::Technology;
use serde::{Deserialize, Serialize};

/// Stable identifier for an ability row.
pub type AbilityId = i64;

/// Mid-level entity: owned by one subject, owning zero or more technologies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub color: String,
    pub image: String,
    pub subject_id: SubjectId,
    /// Owned technologies. `None` outside detail projections.
    #[serde(default)]
    pub technologies: Option<Vec<Technology>>,
}

/// Client-supplied ability fields; the owning subject comes from the route,
/// never from the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDraft {
    pub name: String,
    pub color: String,
    pub image: String,
}

impl Ability {
    /// Builds the summary projection for a freshly assigned id.
    pub fn from_draft(id: AbilityId, subject_id: SubjectId, draft: AbilityDraft) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color,
            image: draft.image,
            subject_id,
            technologies: None,
        }
    }
}
