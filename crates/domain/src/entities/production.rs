//! Production entity with its theatre/playtext references and cast.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::{
    check_string, name_key, trimmed, CHARACTER_NAME_MUST_DIFFER, NAME_DUPLICATED_IN_GROUP,
    NAME_EXISTS, NAME_REQUIRED_IF_NAMED_ROLES, ROLE_NAME_REQUIRED_IF_CHARACTER_NAME,
};
use crate::duplicates::duplicate_indices;
use crate::kind::Kind;
use crate::report::ValidationReport;

/// A production of a playtext at a theatre, with a cast. Unique per name
/// alone; productions carry no differentiator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Production {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub theatre: TheatreRef,
    pub playtext: PlaytextRef,
    pub cast: Vec<CastMember>,
    #[serde(skip)]
    pub errors: ValidationReport,
}

/// A production's by-name reference to its theatre. The name is optional
/// at input validation; the write only links when it is present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TheatreRef {
    pub name: String,
    pub differentiator: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

/// A production's by-name reference to its playtext.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaytextRef {
    pub name: String,
    pub differentiator: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

/// A member of a production's cast, carrying the roles they perform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub name: String,
    pub roles: Vec<Role>,
    #[serde(skip)]
    pub errors: ValidationReport,
}

/// A role a cast member performs. The character name is only carried when
/// it differs from the role's own billing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Role {
    pub name: String,
    #[serde(rename = "characterName")]
    pub character_name: String,
    #[serde(skip)]
    pub errors: ValidationReport,
}

impl Production {
    pub const KIND: Kind = Kind::Production;

    pub fn validated(self) -> Self {
        let name = trimmed(&self.name);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, true);

        let theatre = self.theatre.validated();
        let playtext = self.playtext.validated();

        let duplicates = duplicate_indices(self.cast.iter().map(|member| name_key(&member.name)));
        let cast = self
            .cast
            .into_iter()
            .enumerate()
            .map(|(index, member)| member.validated_in_group(duplicates.contains(&index)))
            .collect();

        Self {
            name,
            theatre,
            playtext,
            cast,
            errors,
            ..self
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
            || self.theatre.has_errors()
            || self.playtext.has_errors()
            || self.cast.iter().any(CastMember::has_errors)
    }

    /// Productions are unique per name alone, so the conflict lands on a
    /// single field.
    pub fn with_uniqueness_conflict(mut self) -> Self {
        self.errors.add("name", NAME_EXISTS);
        self
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }
}

impl TheatreRef {
    fn validated(self) -> Self {
        let name = trimmed(&self.name);
        let differentiator = trimmed(&self.differentiator);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, false);
        check_string(&mut errors, "differentiator", &differentiator, false);

        Self {
            name,
            differentiator,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
    }
}

impl PlaytextRef {
    fn validated(self) -> Self {
        let name = trimmed(&self.name);
        let differentiator = trimmed(&self.differentiator);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, false);
        check_string(&mut errors, "differentiator", &differentiator, false);

        Self {
            name,
            differentiator,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
    }
}

impl CastMember {
    fn validated_in_group(self, is_duplicate: bool) -> Self {
        let name = trimmed(&self.name);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, false);
        if is_duplicate {
            errors.add("name", NAME_DUPLICATED_IN_GROUP);
        }

        let has_named_roles = self.roles.iter().any(|role| !role.name.trim().is_empty());
        if name.is_empty() && has_named_roles {
            errors.add("name", NAME_REQUIRED_IF_NAMED_ROLES);
        }

        let duplicates = duplicate_indices(self.roles.iter().map(|role| name_key(&role.name)));
        let roles = self
            .roles
            .into_iter()
            .enumerate()
            .map(|(index, role)| role.validated_in_group(duplicates.contains(&index)))
            .collect();

        Self {
            name,
            roles,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean() || self.roles.iter().any(Role::has_errors)
    }
}

impl Role {
    fn validated_in_group(self, is_duplicate: bool) -> Self {
        let name = trimmed(&self.name);
        let character_name = trimmed(&self.character_name);

        let mut errors = ValidationReport::new();
        check_string(&mut errors, "name", &name, false);
        check_string(&mut errors, "characterName", &character_name, false);
        if is_duplicate {
            errors.add("name", NAME_DUPLICATED_IN_GROUP);
        }

        // Presence of one identity half implies presence of the other.
        if name.is_empty() && !character_name.is_empty() {
            errors.add("name", ROLE_NAME_REQUIRED_IF_CHARACTER_NAME);
        }
        if !name.is_empty() && name == character_name {
            errors.add("characterName", CHARACTER_NAME_MUST_DIFFER);
        }

        Self {
            name,
            character_name,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_clean()
    }

    /// The character this role targets in the graph: the explicit character
    /// name when present, otherwise the role's own billing. `None` for
    /// unnamed roles, which produce no edge.
    pub fn character_identity(&self) -> Option<&str> {
        if !self.character_name.is_empty() {
            Some(&self.character_name)
        } else if !self.name.is_empty() {
            Some(&self.name)
        } else {
            None
        }
    }
}

impl Serialize for Production {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Self::KIND.model())?;
        if let Some(uuid) = &self.uuid {
            map.serialize_entry("uuid", uuid)?;
        }
        map.serialize_entry("name", &self.name)?;
        if self.has_errors() {
            map.serialize_entry("hasErrors", &true)?;
        }
        map.serialize_entry("errors", &self.errors)?;
        map.serialize_entry("theatre", &self.theatre)?;
        map.serialize_entry("playtext", &self.playtext)?;
        map.serialize_entry("cast", &self.cast)?;
        map.end()
    }
}

impl Serialize for TheatreRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Kind::Theatre.model())?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("differentiator", &self.differentiator)?;
        if self.has_errors() {
            map.serialize_entry("hasErrors", &true)?;
        }
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}

impl Serialize for PlaytextRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Kind::Playtext.model())?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("differentiator", &self.differentiator)?;
        if self.has_errors() {
            map.serialize_entry("hasErrors", &true)?;
        }
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}

impl Serialize for CastMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Kind::CastMember.model())?;
        map.serialize_entry("name", &self.name)?;
        if self.has_errors() {
            map.serialize_entry("hasErrors", &true)?;
        }
        map.serialize_entry("errors", &self.errors)?;
        map.serialize_entry("roles", &self.roles)?;
        map.end()
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", Kind::Role.model())?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("characterName", &self.character_name)?;
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

    fn cast_member(name: &str, roles: &[(&str, &str)]) -> CastMember {
        CastMember {
            name: name.to_string(),
            roles: roles
                .iter()
                .map(|(role_name, character_name)| Role {
                    name: role_name.to_string(),
                    character_name: character_name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_production_fails_only_on_its_own_name() {
        let production = Production::default().validated();

        assert!(production.has_errors());
        assert_eq!(
            serde_json::to_value(&production).expect("serialize"),
            json!({
                "model": "production",
                "name": "",
                "hasErrors": true,
                "errors": { "name": ["Value is too short"] },
                "theatre": {
                    "model": "theatre", "name": "", "differentiator": "", "errors": {}
                },
                "playtext": {
                    "model": "playtext", "name": "", "differentiator": "", "errors": {}
                },
                "cast": []
            })
        );
    }

    #[test]
    fn unnamed_cast_member_with_named_roles_is_rejected() {
        let production = Production {
            name: "King Lear".to_string(),
            cast: vec![cast_member("", &[("King Lear", "")])],
            ..Default::default()
        }
        .validated();

        assert_eq!(
            production.cast[0].errors.messages("name"),
            Some(&["Name is required if cast member has named roles".to_string()][..])
        );
    }

    #[test]
    fn unnamed_cast_member_with_unnamed_roles_is_fine() {
        let production = Production {
            name: "King Lear".to_string(),
            cast: vec![cast_member("", &[("", "")])],
            ..Default::default()
        }
        .validated();

        assert!(!production.has_errors());
    }

    #[test]
    fn character_name_without_role_name_is_rejected() {
        let production = Production {
            name: "Hamlet".to_string(),
            cast: vec![cast_member("David Tennant", &[("", "Hamlet, Prince of Denmark")])],
            ..Default::default()
        }
        .validated();

        assert_eq!(
            production.cast[0].roles[0].errors.messages("name"),
            Some(&["Role name is required if character name is present".to_string()][..])
        );
    }

    #[test]
    fn character_name_equal_to_role_name_is_redundant() {
        let production = Production {
            name: "Hamlet".to_string(),
            cast: vec![cast_member("David Tennant", &[("Hamlet", "Hamlet")])],
            ..Default::default()
        }
        .validated();

        assert_eq!(
            production.cast[0].roles[0].errors.messages("characterName"),
            Some(&["Character name is only required if different from role name".to_string()][..])
        );
    }

    #[test]
    fn duplicate_cast_members_and_roles_flag_all_positions() {
        let production = Production {
            name: "King Lear".to_string(),
            cast: vec![
                cast_member("Ian McKellen", &[("King Lear", ""), ("King Lear", "")]),
                cast_member("Ian McKellen", &[]),
            ],
            ..Default::default()
        }
        .validated();

        for member in &production.cast {
            assert_eq!(
                member.errors.messages("name"),
                Some(&["Name has been duplicated in this group".to_string()][..])
            );
        }
        for role in &production.cast[0].roles {
            assert_eq!(
                role.errors.messages("name"),
                Some(&["Name has been duplicated in this group".to_string()][..])
            );
        }
    }

    #[test]
    fn role_character_identity_prefers_the_explicit_character_name() {
        let explicit = Role {
            name: "The Ghost".to_string(),
            character_name: "King Hamlet".to_string(),
            ..Default::default()
        };
        assert_eq!(explicit.character_identity(), Some("King Hamlet"));

        let implicit = Role {
            name: "Horatio".to_string(),
            ..Default::default()
        };
        assert_eq!(implicit.character_identity(), Some("Horatio"));

        assert_eq!(Role::default().character_identity(), None);
    }

    #[test]
    fn nested_errors_bubble_into_has_errors_but_not_into_the_parent_report() {
        let production = Production {
            name: "Othello".to_string(),
            cast: vec![cast_member("", &[("Iago", "")])],
            ..Default::default()
        }
        .validated();

        assert!(production.errors.is_clean());
        assert!(production.has_errors());
    }

    #[test]
    fn deserializes_nested_request_payload() {
        let production: Production = serde_json::from_value(json!({
            "name": "Macbeth",
            "theatre": { "name": "Almeida Theatre" },
            "playtext": { "name": "Macbeth" },
            "cast": [
                { "name": "Simon Russell Beale", "roles": [
                    { "name": "Macbeth" },
                    { "name": "The Porter", "characterName": "Porter" }
                ] }
            ]
        }))
        .expect("payload");

        assert_eq!(production.theatre.name, "Almeida Theatre");
        assert_eq!(production.cast[0].roles[1].character_name, "Porter");
    }
}
