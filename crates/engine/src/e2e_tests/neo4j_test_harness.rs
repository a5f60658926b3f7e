//! Testcontainer-based Neo4j instance management for E2E tests.

use std::time::Duration;

use neo4rs::{query, Graph};
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};
use tokio::time::sleep;

/// Password used for Neo4j test containers.
pub const TEST_NEO4J_PASSWORD: &str = "testpassword";

/// Manages a disposable Neo4j container and its bolt connection.
pub struct Neo4jTestHarness {
    _container: ContainerAsync<GenericImage>,
    graph: Graph,
}

impl Neo4jTestHarness {
    /// Start a new Neo4j container and establish a verified connection.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container: ContainerAsync<GenericImage> =
            neo4j_image(TEST_NEO4J_PASSWORD).start().await;
        let bolt_port = container.get_host_port_ipv4(7687).await;
        let uri = format!("bolt://127.0.0.1:{bolt_port}");

        let graph = connect_with_retry(&uri, "neo4j", TEST_NEO4J_PASSWORD).await?;

        Ok(Self {
            _container: container,
            graph,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_clone(&self) -> Graph {
        self.graph.clone()
    }
}

/// Pinned image with memory limits so the JVM survives constrained CI hosts.
/// Readiness is verified by `connect_with_retry`, not stdout parsing.
fn neo4j_image(password: &str) -> GenericImage {
    GenericImage::new("neo4j", "5.26.0-community")
        .with_env_var("NEO4J_AUTH", format!("neo4j/{password}"))
        .with_env_var(
            "NEO4J_dbms_connector_bolt_advertised__address",
            "localhost:7687",
        )
        .with_env_var("NEO4J_server_memory_heap_initial__size", "256m")
        .with_env_var("NEO4J_server_memory_heap_max__size", "512m")
        .with_env_var("NEO4J_server_memory_pagecache_size", "128m")
        .with_exposed_port(7687)
        .with_wait_for(WaitFor::seconds(5))
}

/// Connect with exponential backoff, verifying each attempt with a real query.
async fn connect_with_retry(
    uri: &str,
    user: &str,
    pass: &str,
) -> Result<Graph, Box<dyn std::error::Error + Send + Sync>> {
    let max_attempts = 30;
    let max_delay = Duration::from_secs(5);

    let mut delay = Duration::from_millis(500);
    let mut last_err: Option<String> = None;

    for attempt in 1..=max_attempts {
        match Graph::new(uri, user, pass).await {
            Ok(graph) => match graph.run(query("RETURN 1")).await {
                Ok(_) => {
                    tracing::info!(attempt, uri, "Neo4j connection established and verified");
                    return Ok(graph);
                }
                Err(e) => {
                    last_err = Some(format!("Connection test query failed: {e}"));
                }
            },
            Err(e) => {
                last_err = Some(e.to_string());
            }
        }

        sleep(delay).await;
        delay = std::cmp::min(delay.saturating_mul(2), max_delay);
    }

    Err(format!(
        "Failed to connect to Neo4j at {uri} after {max_attempts} attempts: {:?}",
        last_err
    )
    .into())
}
