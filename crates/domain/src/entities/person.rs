//! Person entity.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{check_string, trimmed, NAME_AND_DIFFERENTIATOR_EXISTS};
use crate::kind::Kind;
use crate::report::ValidationReport;

/// A person (performer), unique per `(name, differentiator)`.
///
/// Roles a person performs are not held here; they live on the
/// production-side cast and are surfaced by the person's show projection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Person {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub differentiator: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

impl Person {
    pub const KIND: Kind = Kind::Person;

    pub fn validated(self) -> Self {
        let name = trimmed(&self.name);
        let differentiator = trimmed(&self.differentiator);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, true);
        check_string(&mut errors, "differentiator", &differentiator, false);

        Self {
            name,
            differentiator,
            errors,
            ..self
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
    }

    pub fn with_uniqueness_conflict(mut self) -> Self {
        self.errors.add("name", NAME_AND_DIFFERENTIATOR_EXISTS);
        self.errors
            .add("differentiator", NAME_AND_DIFFERENTIATOR_EXISTS);
        self
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }
}

impl Serialize for Person {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Self::KIND.model())?;
        if let Some(uuid) = &self.uuid {
            map.serialize_entry("uuid", uuid)?;
        }
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("differentiator", &self.differentiator)?;
        if self.has_errors() {
            map.serialize_entry("hasErrors", &true)?;
        }
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}
