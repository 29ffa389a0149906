//! HTTP layer - thin glue over the domain services
//!
//! Handlers translate requests and responses; every decision (validation,
//! uniqueness, atomicity, status derivation) lives in the core.

pub mod admin;
pub mod health;
pub mod keys;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
