//! Character entity.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{check_string, trimmed, NAME_AND_DIFFERENTIATOR_EXISTS};
use crate::kind::Kind;
use crate::report::ValidationReport;

/// A dramatic character, unique per `(name, differentiator)`.
///
/// Characters are also created implicitly when a playtext bills them or a
/// cast member performs them; this type covers the standalone kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Character {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub differentiator: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

impl Character {
    pub const KIND: Kind = Kind::Character;

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

impl Serialize for Character {
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

    #[test]
    fn validated_trims_and_accepts_a_named_character() {
        let character = Character {
            name: " Banquo ".to_string(),
            ..Default::default()
        }
        .validated();

        assert_eq!(character.name, "Banquo");
        assert!(!character.has_errors());
    }

    #[test]
    fn uniqueness_conflict_flags_both_key_fields() {
        let character = Character {
            name: "The Fool".to_string(),
            ..Default::default()
        }
        .validated()
        .with_uniqueness_conflict();

        assert_eq!(
            character.errors.messages("name"),
            Some(&[NAME_AND_DIFFERENTIATOR_EXISTS.to_string()][..])
        );
        assert_eq!(
            character.errors.messages("differentiator"),
            Some(&[NAME_AND_DIFFERENTIATOR_EXISTS.to_string()][..])
        );
    }
}
