//! Theatre entity.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{check_string, trimmed, NAME_AND_DIFFERENTIATOR_EXISTS};
use crate::kind::Kind;
use crate::report::ValidationReport;

/// A theatre, unique per `(name, differentiator)`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theatre {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub differentiator: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

impl Theatre {
    pub const KIND: Kind = Kind::Theatre;

    /// Trim scalar fields and rebuild the report from scratch.
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

    /// Attach the store-uniqueness conflict to both halves of the key.
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

impl Serialize for Theatre {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validated_trims_scalar_fields() {
        let theatre = Theatre {
            name: " Almeida Theatre ".to_string(),
            differentiator: " north ".to_string(),
            ..Default::default()
        }
        .validated();

        assert_eq!(theatre.name, "Almeida Theatre");
        assert_eq!(theatre.differentiator, "north");
        assert!(!theatre.has_errors());
    }

    #[test]
    fn empty_name_fails_validation_with_canonical_body() {
        let theatre = Theatre::default().validated();

        assert!(theatre.has_errors());
        assert_eq!(
            serde_json::to_value(&theatre).expect("serialize"),
            json!({
                "model": "theatre",
                "name": "",
                "differentiator": "",
                "hasErrors": true,
                "errors": { "name": ["Value is too short"] }
            })
        );
    }

    #[test]
    fn overlong_differentiator_is_reported_on_its_own_field() {
        let theatre = Theatre {
            name: "National Theatre".to_string(),
            differentiator: "a".repeat(1001),
            ..Default::default()
        }
        .validated();

        assert_eq!(
            theatre.errors.messages("differentiator"),
            Some(&["Value is too long".to_string()][..])
        );
        assert_eq!(theatre.errors.messages("name"), None);
    }

    #[test]
    fn validation_rebuilds_the_report_rather_than_accumulating() {
        let theatre = Theatre::default().validated().validated();
        assert_eq!(
            theatre.errors.messages("name"),
            Some(&["Value is too short".to_string()][..])
        );
    }

    #[test]
    fn uniqueness_conflict_flags_name_and_differentiator_together() {
        let theatre = Theatre {
            name: "National Theatre".to_string(),
            ..Default::default()
        }
        .validated()
        .with_uniqueness_conflict();

        assert_eq!(
            serde_json::to_value(&theatre).expect("serialize"),
            json!({
                "model": "theatre",
                "name": "National Theatre",
                "differentiator": "",
                "hasErrors": true,
                "errors": {
                    "name": ["Name and differentiator combination already exists"],
                    "differentiator": ["Name and differentiator combination already exists"]
                }
            })
        );
    }

    #[test]
    fn clean_persisted_theatre_serializes_without_has_errors() {
        let uuid = Uuid::new_v4();
        let theatre = Theatre {
            name: "Donmar Warehouse".to_string(),
            ..Default::default()
        }
        .validated()
        .with_uuid(uuid);

        assert_eq!(
            serde_json::to_value(&theatre).expect("serialize"),
            json!({
                "model": "theatre",
                "uuid": uuid,
                "name": "Donmar Warehouse",
                "differentiator": "",
                "errors": {}
            })
        );
    }

    #[test]
    fn deserializes_from_a_request_payload() {
        let theatre: Theatre =
            serde_json::from_value(json!({ "name": "Hampstead Theatre" })).expect("payload");
        assert_eq!(theatre.name, "Hampstead Theatre");
        assert_eq!(theatre.uuid, None);
        assert!(theatre.errors.is_clean());
    }
}
