//! E2E tests against a real Neo4j instance.
//!
//! All tests here are `#[ignore]`d because they require docker.

mod neo4j_test_harness;
