//! `QueryExecutor` implementation over `neo4rs::Graph`.

use async_trait::async_trait;
use neo4rs::Graph;
use serde_json::Value;

use crate::infrastructure::ports::{ParamValue, QueryExecutor, StoreError, StoreQuery};

/// Concrete store over a bolt connection pool.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl QueryExecutor for Neo4jStore {
    async fn execute(&self, query: StoreQuery) -> Result<Vec<Value>, StoreError> {
        let mut bolt = neo4rs::query(&query.statement);
        for (name, value) in query.params {
            bolt = match value {
                ParamValue::Text(text) => bolt.param(name, text),
                ParamValue::TextList(list) => bolt.param(name, list),
            };
        }

        let mut stream = self
            .graph
            .execute(bolt)
            .await
            .map_err(|error| StoreError::database("execute", error))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|error| StoreError::database("stream", error))?
        {
            let value: Value = row.get(query.output).map_err(StoreError::projection)?;
            rows.push(value);
        }
        Ok(rows)
    }
}
