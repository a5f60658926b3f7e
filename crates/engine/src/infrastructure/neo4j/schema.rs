//! Neo4j schema initialization - uuid indexes per node label.

use neo4rs::{query, Graph};
use playbill_domain::Kind;

/// Initialize Neo4j schema with the uuid index every lookup depends on.
///
/// This should be called once on startup. Indexes are created with
/// IF NOT EXISTS to be idempotent.
pub async fn ensure_schema(graph: &Graph) -> Result<(), neo4rs::Error> {
    for kind in [
        Kind::Theatre,
        Kind::Person,
        Kind::Playtext,
        Kind::Production,
        Kind::Character,
    ] {
        graph
            .run(query(&format!(
                "CREATE INDEX {model}_uuid IF NOT EXISTS
                 FOR (n:{label}) ON (n.uuid)",
                model = kind.model(),
                label = kind.label()
            )))
            .await?;
    }

    tracing::info!("Neo4j schema initialized (indexes ensured)");
    Ok(())
}
