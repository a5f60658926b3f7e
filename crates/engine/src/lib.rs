//! Playbill Engine library.
//!
//! Server-side validation and persistence for theatrical production data.
//!
//! ## Structure
//!
//! - `cypher/` - Query template generators per entity kind
//! - `persistence/` - The `Persistable` contract and `EntityService`
//! - `infrastructure/` - Store port and the Neo4j adapter
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod cypher;
pub mod infrastructure;
pub mod persistence;

/// E2E integration tests using real Neo4j via testcontainers.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
