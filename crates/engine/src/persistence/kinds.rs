//! `Persistable` implementations for the five top-level kinds.

use playbill_domain::{
    CastMember, Character, Kind, Person, Playtext, PlaytextCharacter, Production, Theatre,
    ValidationReport,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{decode_encoded_roles, AssociationGuard, Persistable};
use crate::cypher::{self, shared, QueryTemplate};
use crate::infrastructure::ports::{ParamValue, StoreError};

impl Persistable for Theatre {
    const KIND: Kind = Kind::Theatre;

    fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn differentiator(&self) -> Option<&str> {
        Some(&self.differentiator)
    }

    fn errors_mut(&mut self) -> &mut ValidationReport {
        &mut self.errors
    }

    fn validated(self) -> Self {
        Theatre::validated(self)
    }

    fn has_errors(&self) -> bool {
        Theatre::has_errors(self)
    }

    fn with_uuid(self, uuid: Uuid) -> Self {
        Theatre::with_uuid(self, uuid)
    }

    fn with_uniqueness_conflict(self) -> Self {
        Theatre::with_uniqueness_conflict(self)
    }

    fn uniqueness_template() -> QueryTemplate {
        shared::uniqueness(Kind::Theatre)
    }

    fn create_template() -> QueryTemplate {
        shared::create(Kind::Theatre)
    }

    fn edit_template() -> QueryTemplate {
        shared::edit(Kind::Theatre)
    }

    fn update_template() -> QueryTemplate {
        shared::update(Kind::Theatre)
    }

    fn delete_template() -> QueryTemplate {
        cypher::theatre::delete()
    }

    fn show_template() -> QueryTemplate {
        cypher::theatre::show()
    }

    fn list_template() -> QueryTemplate {
        shared::list(Kind::Theatre)
    }

    fn association_guard() -> AssociationGuard {
        AssociationGuard {
            error_key: "dependentAssociations",
            blocking: &["productions"],
        }
    }

    fn write_params(&self, uuid: Uuid) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("uuid", ParamValue::text(uuid.to_string())),
            ("name", ParamValue::text(&self.name)),
            ("differentiator", ParamValue::text(&self.differentiator)),
        ]
    }
}

impl Persistable for Person {
    const KIND: Kind = Kind::Person;

    fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn differentiator(&self) -> Option<&str> {
        Some(&self.differentiator)
    }

    fn errors_mut(&mut self) -> &mut ValidationReport {
        &mut self.errors
    }

    fn validated(self) -> Self {
        Person::validated(self)
    }

    fn has_errors(&self) -> bool {
        Person::has_errors(self)
    }

    fn with_uuid(self, uuid: Uuid) -> Self {
        Person::with_uuid(self, uuid)
    }

    fn with_uniqueness_conflict(self) -> Self {
        Person::with_uniqueness_conflict(self)
    }

    fn uniqueness_template() -> QueryTemplate {
        shared::uniqueness(Kind::Person)
    }

    fn create_template() -> QueryTemplate {
        shared::create(Kind::Person)
    }

    fn edit_template() -> QueryTemplate {
        shared::edit(Kind::Person)
    }

    fn update_template() -> QueryTemplate {
        shared::update(Kind::Person)
    }

    fn delete_template() -> QueryTemplate {
        cypher::person::delete()
    }

    fn show_template() -> QueryTemplate {
        cypher::person::show()
    }

    fn list_template() -> QueryTemplate {
        shared::list(Kind::Person)
    }

    fn association_guard() -> AssociationGuard {
        AssociationGuard {
            error_key: "dependentAssociations",
            blocking: &["productions"],
        }
    }

    fn write_params(&self, uuid: Uuid) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("uuid", ParamValue::text(uuid.to_string())),
            ("name", ParamValue::text(&self.name)),
            ("differentiator", ParamValue::text(&self.differentiator)),
        ]
    }

    /// A person's productions carry their role billings JSON-encoded on
    /// the `PERFORMS_IN` edge.
    fn postprocess_show(mut projection: Value) -> Value {
        if let Some(productions) = projection.get_mut("productions") {
            decode_encoded_roles(productions);
        }
        projection
    }
}

impl Persistable for Character {
    const KIND: Kind = Kind::Character;

    fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn differentiator(&self) -> Option<&str> {
        Some(&self.differentiator)
    }

    fn errors_mut(&mut self) -> &mut ValidationReport {
        &mut self.errors
    }

    fn validated(self) -> Self {
        Character::validated(self)
    }

    fn has_errors(&self) -> bool {
        Character::has_errors(self)
    }

    fn with_uuid(self, uuid: Uuid) -> Self {
        Character::with_uuid(self, uuid)
    }

    fn with_uniqueness_conflict(self) -> Self {
        Character::with_uniqueness_conflict(self)
    }

    fn uniqueness_template() -> QueryTemplate {
        shared::uniqueness(Kind::Character)
    }

    fn create_template() -> QueryTemplate {
        shared::create(Kind::Character)
    }

    fn edit_template() -> QueryTemplate {
        shared::edit(Kind::Character)
    }

    fn update_template() -> QueryTemplate {
        shared::update(Kind::Character)
    }

    fn delete_template() -> QueryTemplate {
        cypher::character::delete()
    }

    fn show_template() -> QueryTemplate {
        cypher::character::show()
    }

    fn list_template() -> QueryTemplate {
        shared::list(Kind::Character)
    }

    fn association_guard() -> AssociationGuard {
        AssociationGuard {
            error_key: "dependentAssociations",
            blocking: &["playtexts"],
        }
    }

    fn write_params(&self, uuid: Uuid) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("uuid", ParamValue::text(uuid.to_string())),
            ("name", ParamValue::text(&self.name)),
            ("differentiator", ParamValue::text(&self.differentiator)),
        ]
    }
}

impl Persistable for Playtext {
    const KIND: Kind = Kind::Playtext;

    fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn differentiator(&self) -> Option<&str> {
        Some(&self.differentiator)
    }

    fn errors_mut(&mut self) -> &mut ValidationReport {
        &mut self.errors
    }

    fn validated(self) -> Self {
        Playtext::validated(self)
    }

    fn has_errors(&self) -> bool {
        Playtext::has_errors(self)
    }

    fn with_uuid(self, uuid: Uuid) -> Self {
        Playtext::with_uuid(self, uuid)
    }

    fn with_uniqueness_conflict(self) -> Self {
        Playtext::with_uniqueness_conflict(self)
    }

    fn uniqueness_template() -> QueryTemplate {
        shared::uniqueness(Kind::Playtext)
    }

    fn create_template() -> QueryTemplate {
        cypher::playtext::create()
    }

    fn edit_template() -> QueryTemplate {
        cypher::playtext::edit()
    }

    fn update_template() -> QueryTemplate {
        cypher::playtext::update()
    }

    fn delete_template() -> QueryTemplate {
        cypher::playtext::delete()
    }

    fn show_template() -> QueryTemplate {
        cypher::playtext::show()
    }

    fn list_template() -> QueryTemplate {
        shared::list(Kind::Playtext)
    }

    fn association_guard() -> AssociationGuard {
        AssociationGuard {
            error_key: "dependentAssociations",
            blocking: &["productions"],
        }
    }

    fn write_params(&self, uuid: Uuid) -> Vec<(&'static str, ParamValue)> {
        let billed: Vec<&PlaytextCharacter> = self
            .characters
            .iter()
            .filter(|character| !character.name.is_empty())
            .collect();

        vec![
            ("uuid", ParamValue::text(uuid.to_string())),
            ("name", ParamValue::text(&self.name)),
            ("differentiator", ParamValue::text(&self.differentiator)),
            (
                "character_names",
                ParamValue::TextList(billed.iter().map(|c| c.name.clone()).collect()),
            ),
            (
                "character_differentiators",
                ParamValue::TextList(billed.iter().map(|c| c.differentiator.clone()).collect()),
            ),
            (
                "character_qualifiers",
                ParamValue::TextList(billed.iter().map(|c| c.qualifier.clone()).collect()),
            ),
            (
                "character_uuids",
                ParamValue::TextList(billed.iter().map(|_| Uuid::new_v4().to_string()).collect()),
            ),
        ]
    }
}

/// Role billing persisted on the `PERFORMS_IN` edge, JSON-encoded because
/// edge properties cannot hold maps.
#[derive(Serialize)]
struct RoleBilling<'a> {
    name: &'a str,
    #[serde(rename = "characterName")]
    character_name: &'a str,
}

fn encoded_role_billing(member: &CastMember) -> String {
    let billing: Vec<RoleBilling<'_>> = member
        .roles
        .iter()
        .filter(|role| !role.name.is_empty())
        .map(|role| RoleBilling {
            name: &role.name,
            character_name: &role.character_name,
        })
        .collect();
    serde_json::to_string(&billing).unwrap_or_else(|_| "[]".to_string())
}

impl Persistable for Production {
    const KIND: Kind = Kind::Production;

    fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn differentiator(&self) -> Option<&str> {
        None
    }

    fn errors_mut(&mut self) -> &mut ValidationReport {
        &mut self.errors
    }

    fn validated(self) -> Self {
        Production::validated(self)
    }

    fn has_errors(&self) -> bool {
        Production::has_errors(self)
    }

    fn with_uuid(self, uuid: Uuid) -> Self {
        Production::with_uuid(self, uuid)
    }

    fn with_uniqueness_conflict(self) -> Self {
        Production::with_uniqueness_conflict(self)
    }

    fn uniqueness_template() -> QueryTemplate {
        shared::uniqueness(Kind::Production)
    }

    fn create_template() -> QueryTemplate {
        cypher::production::create()
    }

    fn edit_template() -> QueryTemplate {
        cypher::production::edit()
    }

    fn update_template() -> QueryTemplate {
        cypher::production::update()
    }

    fn delete_template() -> QueryTemplate {
        cypher::production::delete()
    }

    fn show_template() -> QueryTemplate {
        cypher::production::show()
    }

    fn list_template() -> QueryTemplate {
        cypher::production::list()
    }

    fn association_guard() -> AssociationGuard {
        AssociationGuard {
            error_key: "associations",
            blocking: &["Person", "Playtext", "Theatre"],
        }
    }

    fn write_params(&self, uuid: Uuid) -> Vec<(&'static str, ParamValue)> {
        let cast: Vec<&CastMember> = self
            .cast
            .iter()
            .filter(|member| !member.name.is_empty())
            .collect();

        // One PERFORMS_AS edge per named role, flattened across the cast.
        let mut performance_person_names = Vec::new();
        let mut performance_character_names = Vec::new();
        let mut performance_character_uuids = Vec::new();
        let mut performance_role_names = Vec::new();
        for member in &cast {
            for role in member.roles.iter().filter(|role| !role.name.is_empty()) {
                if let Some(character) = role.character_identity() {
                    performance_person_names.push(member.name.clone());
                    performance_character_names.push(character.to_string());
                    performance_character_uuids.push(Uuid::new_v4().to_string());
                    performance_role_names.push(role.name.clone());
                }
            }
        }

        vec![
            ("uuid", ParamValue::text(uuid.to_string())),
            ("name", ParamValue::text(&self.name)),
            ("theatre_name", ParamValue::text(&self.theatre.name)),
            (
                "theatre_differentiator",
                ParamValue::text(&self.theatre.differentiator),
            ),
            (
                "theatre_uuid",
                ParamValue::text(Uuid::new_v4().to_string()),
            ),
            ("playtext_name", ParamValue::text(&self.playtext.name)),
            (
                "playtext_differentiator",
                ParamValue::text(&self.playtext.differentiator),
            ),
            (
                "playtext_uuid",
                ParamValue::text(Uuid::new_v4().to_string()),
            ),
            (
                "cast_names",
                ParamValue::TextList(cast.iter().map(|m| m.name.clone()).collect()),
            ),
            (
                "cast_uuids",
                ParamValue::TextList(cast.iter().map(|_| Uuid::new_v4().to_string()).collect()),
            ),
            (
                "cast_roles",
                ParamValue::TextList(cast.iter().map(|m| encoded_role_billing(m)).collect()),
            ),
            (
                "performance_person_names",
                ParamValue::TextList(performance_person_names),
            ),
            (
                "performance_character_names",
                ParamValue::TextList(performance_character_names),
            ),
            (
                "performance_character_uuids",
                ParamValue::TextList(performance_character_uuids),
            ),
            (
                "performance_role_names",
                ParamValue::TextList(performance_role_names),
            ),
        ]
    }

    /// Edit projections carry the cast's role billings JSON-encoded and
    /// `NULL` references for unlinked theatre/playtext; both need massaging
    /// before the entity can be rebuilt.
    fn from_projection(mut projection: Value) -> Result<Self, StoreError> {
        if let Some(object) = projection.as_object_mut() {
            for reference in ["theatre", "playtext"] {
                if object.get(reference).is_some_and(Value::is_null) {
                    object.remove(reference);
                }
            }
        }
        if let Some(cast) = projection.get_mut("cast") {
            decode_encoded_roles(cast);
        }
        serde_json::from_value(projection).map_err(StoreError::projection)
    }

    fn postprocess_show(mut projection: Value) -> Value {
        if let Some(cast) = projection.get_mut("cast") {
            decode_encoded_roles(cast);
        }
        projection
    }
}
