//! Persistence contract and orchestration.
//!
//! `Persistable` is the per-kind dispatch surface: templates, write
//! parameters, association rules, and the projection factory, all resolved
//! at compile time. `EntityService` drives the two-phase create/update
//! protocol and the guarded delete over any implementor.

mod kinds;
mod service;

pub use service::EntityService;

use playbill_domain::{Kind, ValidationReport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::cypher::QueryTemplate;
use crate::infrastructure::ports::{ParamValue, StoreError};

/// Per-kind delete guard: which errors key a blocked delete reports under,
/// and the names the store's guard list can contain.
#[derive(Debug, Clone, Copy)]
pub struct AssociationGuard {
    pub error_key: &'static str,
    pub blocking: &'static [&'static str],
}

/// The compiled dispatch surface for one top-level entity kind.
pub trait Persistable:
    Serialize + DeserializeOwned + Default + Send + Sync + Sized + 'static
{
    const KIND: Kind;

    fn uuid(&self) -> Option<Uuid>;
    fn name(&self) -> &str;
    fn differentiator(&self) -> Option<&str>;
    fn errors_mut(&mut self) -> &mut ValidationReport;

    fn validated(self) -> Self;
    fn has_errors(&self) -> bool;
    fn with_uuid(self, uuid: Uuid) -> Self;
    fn with_uniqueness_conflict(self) -> Self;

    fn uniqueness_template() -> QueryTemplate;
    fn create_template() -> QueryTemplate;
    fn edit_template() -> QueryTemplate;
    fn update_template() -> QueryTemplate;
    fn delete_template() -> QueryTemplate;
    fn show_template() -> QueryTemplate;
    fn list_template() -> QueryTemplate;

    fn association_guard() -> AssociationGuard;

    /// Parameters for the create/update write. `uuid` is the node's uuid:
    /// freshly generated for create, the existing one for update. Nested
    /// members generate their own uuids here; members with blank names are
    /// skipped by the write.
    fn write_params(&self, uuid: Uuid) -> Vec<(&'static str, ParamValue)>;

    /// Parameters for the uniqueness check. The empty-string uuid sentinel
    /// stands in when the entity has not been persisted yet.
    fn uniqueness_params(&self) -> Vec<(&'static str, ParamValue)> {
        let mut params = vec![
            (
                "uuid",
                ParamValue::text(self.uuid().map(|uuid| uuid.to_string()).unwrap_or_default()),
            ),
            ("name", ParamValue::text(self.name())),
        ];
        if let Some(differentiator) = self.differentiator() {
            params.push(("differentiator", ParamValue::text(differentiator)));
        }
        params
    }

    /// Rebuild an entity from the store's canonical projection. The result
    /// carries empty reports: it represents confirmed persisted state, not
    /// the instance that was validated.
    fn from_projection(projection: Value) -> Result<Self, StoreError> {
        serde_json::from_value(projection).map_err(StoreError::projection)
    }

    /// Attach a blocked delete's association list under the kind's guard key.
    fn with_delete_conflict(mut self, blocking: Vec<String>) -> Self {
        let key = Self::association_guard().error_key;
        for name in blocking {
            self.errors_mut().add(key, name);
        }
        self
    }

    /// Hook for kinds whose show projection needs decoding (JSON-encoded
    /// role billings on edges).
    fn postprocess_show(projection: Value) -> Value {
        projection
    }
}

/// Decode the JSON-encoded `roles` property on each entry of a projected
/// list into a real array, in place.
pub(crate) fn decode_encoded_roles(list: &mut Value) {
    if let Some(entries) = list.as_array_mut() {
        for entry in entries {
            if let Some(roles) = entry.get_mut("roles") {
                if let Some(encoded) = roles.as_str() {
                    *roles = serde_json::from_str(encoded).unwrap_or_else(|_| Value::Array(vec![]));
                }
            }
        }
    }
}
