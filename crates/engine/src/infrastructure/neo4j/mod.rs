//! Neo4j adapter: the concrete store behind the query executor port.

mod schema;
mod store;

pub use schema::ensure_schema;
pub use store::Neo4jStore;
