//! HTTP API layer for the eportfolio backend.
//!
//! # Responsibility
//! - Map REST routes onto core resource service operations.
//! - Enforce the bearer-token gate on every mutating route.
//! - Translate domain outcomes into status codes and JSON bodies.
//!
//! # Invariants
//! - Handlers hold no state beyond [`state::AppState`]; everything is
//!   constructed once at startup and passed explicitly.
//! - Read-only routes never require authentication; mutating routes always do.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
