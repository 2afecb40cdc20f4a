//! Domain model for the portfolio ownership chain.
//!
//! # Responsibility
//! - Define canonical entity shapes shared by repositories, services and API.
//! - Keep list-vs-detail projection state explicit (`Option` child vectors).
//!
//! # Invariants
//! - Every entity is identified by a stable, server-assigned integer id.
//! - Child collections are `None` unless a detail lookup populated them;
//!   repositories never populate them implicitly.

pub mod ability;
pub mod project;
pub mod subject;
pub mod technology;
pub mod user;
