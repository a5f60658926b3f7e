//! The closed set of entity kinds.

use serde::Serialize;

/// One of the fixed entity categories persisted to the graph.
///
/// Dispatch over kinds is resolved at compile time through each kind's
/// entity type; `Kind` itself only carries the naming conventions the
/// store and the response bodies share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Theatre,
    Person,
    Playtext,
    Production,
    Character,
    Role,
    CastMember,
}

impl Kind {
    /// Serialized tag carried in every response body (`model` field).
    pub fn model(self) -> &'static str {
        match self {
            Kind::Theatre => "theatre",
            Kind::Person => "person",
            Kind::Playtext => "playtext",
            Kind::Production => "production",
            Kind::Character => "character",
            Kind::Role => "role",
            Kind::CastMember => "castMember",
        }
    }

    /// Node label in the graph, also the capitalized name used when a
    /// blocked delete reports a required association.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Theatre => "Theatre",
            Kind::Person => "Person",
            Kind::Playtext => "Playtext",
            Kind::Production => "Production",
            Kind::Character => "Character",
            Kind::Role => "Role",
            Kind::CastMember => "CastMember",
        }
    }

    /// Plural lower-case name used when a blocked delete reports a
    /// dependent association.
    pub fn plural(self) -> &'static str {
        match self {
            Kind::Theatre => "theatres",
            Kind::Person => "people",
            Kind::Playtext => "playtexts",
            Kind::Production => "productions",
            Kind::Character => "characters",
            Kind::Role => "roles",
            Kind::CastMember => "castMembers",
        }
    }

    /// Whether entities of this kind carry a differentiator as part of
    /// their uniqueness key.
    pub fn has_differentiator(self) -> bool {
        matches!(
            self,
            Kind::Theatre | Kind::Person | Kind::Playtext | Kind::Character
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_tags_match_response_vocabulary() {
        assert_eq!(Kind::Theatre.model(), "theatre");
        assert_eq!(Kind::CastMember.model(), "castMember");
        assert_eq!(Kind::Playtext.label(), "Playtext");
        assert_eq!(Kind::Person.plural(), "people");
    }

    #[test]
    fn differentiator_support_is_limited_to_name_bearing_kinds() {
        assert!(Kind::Theatre.has_differentiator());
        assert!(Kind::Person.has_differentiator());
        assert!(Kind::Playtext.has_differentiator());
        assert!(Kind::Character.has_differentiator());
        assert!(!Kind::Production.has_differentiator());
        assert!(!Kind::Role.has_differentiator());
        assert!(!Kind::CastMember.has_differentiator());
    }
}
