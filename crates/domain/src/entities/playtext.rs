//! Playtext entity and its billed characters.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{check_string, trimmed, NAME_AND_DIFFERENTIATOR_EXISTS, NAME_DUPLICATED_IN_GROUP};
use crate::duplicates::duplicate_indices;
use crate::kind::Kind;
use crate::report::ValidationReport;

/// A playtext, unique per `(name, differentiator)`, billing an ordered
/// group of characters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Playtext {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub differentiator: String,
    pub characters: Vec<PlaytextCharacter>,
    #[serde(skip)]
    pub errors: ValidationReport,
}

/// A playtext's billing of a character.
///
/// The qualifier distinguishes repeat appearances of the same character
/// (for example a character billed young and old), so it participates in
/// the group's duplicate key alongside name and differentiator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaytextCharacter {
    pub name: String,
    pub differentiator: String,
    pub qualifier: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

impl Playtext {
    pub const KIND: Kind = Kind::Playtext;

    pub fn validated(self) -> Self {
        let name = trimmed(&self.name);
        let differentiator = trimmed(&self.differentiator);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, true);
        check_string(&mut errors, "differentiator", &differentiator, false);

        let duplicates = duplicate_indices(self.characters.iter().map(PlaytextCharacter::group_key));
        let characters = self
            .characters
            .into_iter()
            .enumerate()
            .map(|(index, character)| character.validated_in_group(duplicates.contains(&index)))
            .collect();

        Self {
            name,
            differentiator,
            characters,
            errors,
            ..self
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
            || self
                .characters
                .iter()
                .any(PlaytextCharacter::has_errors)
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

impl PlaytextCharacter {
    /// Duplicate key: identity triple, absent when the name is blank.
    fn group_key(&self) -> Option<(String, String, String)> {
        let name = self.name.trim();
        (!name.is_empty()).then(|| {
            (
                name.to_string(),
                self.differentiator.trim().to_string(),
                self.qualifier.trim().to_string(),
            )
        })
    }

    fn validated_in_group(self, is_duplicate: bool) -> Self {
        let name = trimmed(&self.name);
        let differentiator = trimmed(&self.differentiator);
        let qualifier = trimmed(&self.qualifier);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, false);
        check_string(&mut errors, "differentiator", &differentiator, false);
        check_string(&mut errors, "qualifier", &qualifier, false);
        if is_duplicate {
            errors.add("name", NAME_DUPLICATED_IN_GROUP);
        }

        Self {
            name,
            differentiator,
            qualifier,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
    }
}

impl Serialize for Playtext {
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
        map.serialize_entry("characters", &self.characters)?;
        map.end()
    }
}

impl Serialize for PlaytextCharacter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Kind::Character.model())?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("differentiator", &self.differentiator)?;
        map.serialize_entry("qualifier", &self.qualifier)?;
        if self.has_errors() {
            map.serialize_entry("hasErrors", &true)?;
        }
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}
