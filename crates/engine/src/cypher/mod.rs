//! Query template generation.
//!
//! Pure mapping from (entity kind, logical operation) to a parameterized
//! Cypher statement. Templates are data; they never execute anything.
//! `shared` holds the forms common across kinds; the kind modules override
//! where a kind writes nested groups or projects one-hop relationships.

pub mod character;
pub mod person;
pub mod playtext;
pub mod production;
pub mod shared;
pub mod theatre;

/// A parameterized query template: the statement, the parameter names it
/// expects bound, and the alias of its single returned column.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    pub statement: String,
    pub parameters: &'static [&'static str],
    pub output: &'static str,
}

/// Alias for projections of a single entity.
pub const INSTANCE: &str = "instance";

/// Alias for the clamped count returned by uniqueness checks.
pub const INSTANCE_COUNT: &str = "instance_count";
