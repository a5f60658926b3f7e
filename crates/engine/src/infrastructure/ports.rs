//! Store port: the abstract collaborator the engine executes queries through.

use async_trait::async_trait;
use serde_json::Value;

/// A parameter value bound into a store query.
///
/// The engine only ever binds strings and string lists; positions and
/// counts are derived inside the statements themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    TextList(Vec<String>),
}

impl ParamValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// A fully parameterized query ready for execution: the statement, its
/// bound parameters, and the alias of the single returned column.
#[derive(Debug, Clone)]
pub struct StoreQuery {
    pub statement: String,
    pub params: Vec<(&'static str, ParamValue)>,
    pub output: &'static str,
}

/// Store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No node matched the requested uuid.
    #[error("{kind} not found: {uuid}")]
    NotFound { kind: &'static str, uuid: String },

    /// Connectivity or query failure - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// The store returned a row the engine could not decode.
    #[error("Malformed projection: {0}")]
    Projection(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, uuid: impl ToString) -> Self {
        Self::NotFound {
            kind,
            uuid: uuid.to_string(),
        }
    }

    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn projection(message: impl ToString) -> Self {
        Self::Projection(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Executes parameterized queries against the store, one JSON value per
/// returned row. The engine issues at most one call at a time per logical
/// operation; there is no batching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: StoreQuery) -> Result<Vec<Value>, StoreError>;
}
