//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into ownership-aware operations.
//! - Own transaction boundaries for multi-row invariants (nested creation,
//!   cascade deletion).
//! - Compute list-vs-detail projections at the service boundary.

pub mod portfolio_service;
