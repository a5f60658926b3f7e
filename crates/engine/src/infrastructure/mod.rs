//! External dependency implementations: the store port and its Neo4j adapter.

pub mod neo4j;
pub mod ports;
