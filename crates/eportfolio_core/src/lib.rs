//! Core domain logic for the eportfolio backend.
//! This crate is the single source of truth for ownership and cascade invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::{AuthError, AuthResult, CredentialVerifier};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ability::{Ability, AbilityDraft, AbilityId};
pub use model::project::{Project, ProjectDraft, ProjectId};
pub use model::subject::{Subject, SubjectDraft, SubjectId};
pub use model::technology::{Technology, TechnologyDraft, TechnologyId};
pub use model::user::Credential;
pub use repo::{RepoError, RepoResult};
pub use service::portfolio_service::{PortfolioService, ServiceError, ServiceResult};

/// Version string reported by the API health endpoint.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
