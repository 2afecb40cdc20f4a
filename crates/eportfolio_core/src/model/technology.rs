//! Technology domain model.
//!
//! # Invariants
//! - A technology cannot exist without an owning ability (`ability_id`).
//! - Deleted whenever its owning ability is deleted.

use crate::model::ability::AbilityId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a technology row.
pub type TechnologyId = i64;

/// Leaf entity of the ownership chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub id: TechnologyId,
    pub name: String,
    pub image: String,
    pub ability_id: AbilityId,
}

/// Client-supplied technology fields; the owning ability comes from the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyDraft {
    pub name: String,
    pub image: String,
}

impl Technology {
    /// Builds the stored shape for a freshly assigned id.
    pub fn from_draft(id: TechnologyId, ability_id: AbilityId, draft: TechnologyDraft) -> Self {
        Self {
            id,
            name: draft.name,
            image: draft.image,
            ability_id,
        }
    }
}
