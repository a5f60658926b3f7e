//! `EntityService`: the generic orchestrator over any `Persistable` kind.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::Persistable;
use crate::cypher::QueryTemplate;
use crate::infrastructure::ports::{ParamValue, QueryExecutor, StoreError, StoreQuery};

fn bind(template: QueryTemplate, params: Vec<(&'static str, ParamValue)>) -> StoreQuery {
    debug_assert!(params
        .iter()
        .map(|(name, _)| *name)
        .eq(template.parameters.iter().copied()));
    StoreQuery {
        statement: template.statement,
        params,
        output: template.output,
    }
}

fn uuid_params(uuid: Uuid) -> Vec<(&'static str, ParamValue)> {
    vec![("uuid", ParamValue::text(uuid.to_string()))]
}

/// Drives the persistence protocol for every top-level kind against an
/// abstract store.
#[derive(Clone)]
pub struct EntityService {
    store: Arc<dyn QueryExecutor>,
}

impl EntityService {
    pub fn new(store: Arc<dyn QueryExecutor>) -> Self {
        Self { store }
    }

    /// Two-phase create: validate locally, check the uniqueness key against
    /// the store, then write under a freshly generated uuid. A failed phase
    /// returns the annotated entity, not an error.
    pub async fn create<E: Persistable>(&self, entity: E) -> Result<E, StoreError> {
        self.create_update(entity, Uuid::new_v4(), E::create_template(), "create")
            .await
    }

    /// Two-phase update against the node at `uuid`. The entity adopts the
    /// path uuid before the uniqueness check so its own node is excluded.
    pub async fn update<E: Persistable>(&self, uuid: Uuid, entity: E) -> Result<E, StoreError> {
        self.create_update(entity.with_uuid(uuid), uuid, E::update_template(), "update")
            .await
    }

    async fn create_update<E: Persistable>(
        &self,
        entity: E,
        uuid: Uuid,
        write: QueryTemplate,
        operation: &'static str,
    ) -> Result<E, StoreError> {
        let entity = entity.validated();
        if entity.has_errors() {
            tracing::debug!(
                kind = E::KIND.model(),
                operation,
                "rejected by local validation"
            );
            return Ok(entity);
        }

        let rows = self
            .store
            .execute(bind(E::uniqueness_template(), entity.uniqueness_params()))
            .await?;
        let conflicted = rows.first().and_then(Value::as_i64).unwrap_or(0) > 0;
        if conflicted {
            tracing::debug!(
                kind = E::KIND.model(),
                operation,
                name = entity.name(),
                "uniqueness conflict"
            );
            return Ok(entity.with_uniqueness_conflict());
        }

        let rows = self
            .store
            .execute(bind(write, entity.write_params(uuid)))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(E::KIND.model(), uuid))?;
        tracing::debug!(kind = E::KIND.model(), operation, %uuid, "persisted");
        E::from_projection(row)
    }

    /// Form pre-fill fetch: the entity rebuilt from its canonical projection.
    pub async fn edit<E: Persistable>(&self, uuid: Uuid) -> Result<E, StoreError> {
        let rows = self
            .store
            .execute(bind(E::edit_template(), uuid_params(uuid)))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(E::KIND.model(), uuid))?;
        E::from_projection(row)
    }

    /// Guarded delete: one round trip that either detach-deletes the node or
    /// reports the associations blocking it.
    pub async fn delete<E: Persistable>(&self, uuid: Uuid) -> Result<E, StoreError> {
        let rows = self
            .store
            .execute(bind(E::delete_template(), uuid_params(uuid)))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(E::KIND.model(), uuid))?;

        // Only names from the kind's own guard vocabulary are reportable.
        let guard = E::association_guard();
        let blocking: Vec<String> = row
            .get(guard.error_key)
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|name| guard.blocking.contains(name))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let entity = E::from_projection(row)?;
        if blocking.is_empty() {
            tracing::debug!(kind = E::KIND.model(), %uuid, "deleted");
            Ok(entity)
        } else {
            tracing::debug!(kind = E::KIND.model(), %uuid, ?blocking, "delete blocked");
            Ok(entity.with_delete_conflict(blocking))
        }
    }

    /// Read-facing projection with every association the kind surfaces.
    pub async fn show<E: Persistable>(&self, uuid: Uuid) -> Result<Value, StoreError> {
        let rows = self
            .store
            .execute(bind(E::show_template(), uuid_params(uuid)))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(E::KIND.model(), uuid))?;
        Ok(E::postprocess_show(row))
    }

    /// Summary projections of every node of the kind.
    pub async fn list<E: Persistable>(&self) -> Result<Vec<Value>, StoreError> {
        self.store.execute(bind(E::list_template(), vec![])).await
    }
}
