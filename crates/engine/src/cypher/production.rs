//! Production-specific templates.
//!
//! A production's write carries three nested groups: the theatre and
//! playtext references (linked only when named) and the cast. Cast members
//! arrive as parallel lists; each member's role billing is a JSON-encoded
//! string stored on the `PERFORMS_IN` edge, while each named role also
//! produces a `PERFORMS_AS` edge from the person to the targeted character,
//! flattened into its own parallel lists.

use super::{QueryTemplate, INSTANCE};

const WRITE_PARAMETERS: &[&str] = &[
    "uuid",
    "name",
    "theatre_name",
    "theatre_differentiator",
    "theatre_uuid",
    "playtext_name",
    "playtext_differentiator",
    "playtext_uuid",
    "cast_names",
    "cast_uuids",
    "cast_roles",
    "performance_person_names",
    "performance_character_names",
    "performance_character_uuids",
    "performance_role_names",
];

/// Attach fragment shared by create and update: link the named theatre and
/// playtext, merge the cast, then merge one character edge per named role.
fn attach_associations() -> &'static str {
    "FOREACH (_ IN CASE WHEN $theatre_name = '' THEN [] ELSE [1] END |\n\
     \tMERGE (theatre:Theatre { name: $theatre_name, differentiator: $theatre_differentiator })\n\
     \t\tON CREATE SET theatre.uuid = $theatre_uuid\n\
     \tCREATE (production)-[:PLAYS_AT]->(theatre)\n\
     )\n\
     FOREACH (_ IN CASE WHEN $playtext_name = '' THEN [] ELSE [1] END |\n\
     \tMERGE (playtext:Playtext { name: $playtext_name, differentiator: $playtext_differentiator })\n\
     \t\tON CREATE SET playtext.uuid = $playtext_uuid\n\
     \tCREATE (production)-[:PRODUCTION_OF]->(playtext)\n\
     )\n\
     WITH production\n\
     UNWIND (CASE WHEN $cast_names = [] THEN [NULL] ELSE RANGE(0, SIZE($cast_names) - 1) END) AS position\n\
     FOREACH (_ IN CASE WHEN position IS NULL THEN [] ELSE [1] END |\n\
     \tMERGE (person:Person { name: $cast_names[position] })\n\
     \t\tON CREATE SET person.uuid = $cast_uuids[position]\n\
     \tCREATE (person)-[:PERFORMS_IN {\n\
     \t\tposition: position,\n\
     \t\troles: $cast_roles[position]\n\
     \t}]->(production)\n\
     )\n\
     WITH DISTINCT production\n\
     UNWIND (CASE WHEN $performance_role_names = [] THEN [NULL] ELSE RANGE(0, SIZE($performance_role_names) - 1) END) AS role_position\n\
     FOREACH (_ IN CASE WHEN role_position IS NULL THEN [] ELSE [1] END |\n\
     \tMERGE (person:Person { name: $performance_person_names[role_position] })\n\
     \tMERGE (character:Character { name: $performance_character_names[role_position] })\n\
     \t\tON CREATE SET character.uuid = $performance_character_uuids[role_position]\n\
     \tCREATE (person)-[:PERFORMS_AS {\n\
     \t\tproduction_uuid: $uuid,\n\
     \t\trole_name: $performance_role_names[role_position]\n\
     \t}]->(character)\n\
     )\n\
     WITH DISTINCT production\n\
     RETURN {\n\
     \tmodel: 'production',\n\
     \tuuid: production.uuid,\n\
     \tname: production.name\n\
     } AS instance"
}

pub fn create() -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "CREATE (production:Production {{ uuid: $uuid, name: $name }})\n\
             WITH production\n\
             {attach}",
            attach = attach_associations()
        ),
        parameters: WRITE_PARAMETERS,
        output: INSTANCE,
    }
}

/// Relationships are re-linked by detach-and-reattach, never merged.
pub fn update() -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "MATCH (production:Production {{ uuid: $uuid }})\n\
             \tSET production.name = $name\n\
             WITH production\n\
             OPTIONAL MATCH (production)-[plays_at:PLAYS_AT]->(:Theatre)\n\
             DELETE plays_at\n\
             WITH DISTINCT production\n\
             OPTIONAL MATCH (production)-[production_of:PRODUCTION_OF]->(:Playtext)\n\
             DELETE production_of\n\
             WITH DISTINCT production\n\
             OPTIONAL MATCH (:Person)-[performs_in:PERFORMS_IN]->(production)\n\
             DELETE performs_in\n\
             WITH DISTINCT production\n\
             OPTIONAL MATCH (:Person)-[performs_as:PERFORMS_AS {{ production_uuid: $uuid }}]->(:Character)\n\
             DELETE performs_as\n\
             WITH DISTINCT production\n\
             {attach}",
            attach = attach_associations()
        ),
        parameters: WRITE_PARAMETERS,
        output: INSTANCE,
    }
}

/// Pre-fill fetch including the references and cast in position order.
pub fn edit() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (production:Production { uuid: $uuid })\n\
             OPTIONAL MATCH (production)-[:PLAYS_AT]->(theatre:Theatre)\n\
             OPTIONAL MATCH (production)-[:PRODUCTION_OF]->(playtext:Playtext)\n\
             OPTIONAL MATCH (person:Person)-[performance:PERFORMS_IN]->(production)\n\
             WITH production, theatre, playtext, person, performance\n\
             \tORDER BY performance.position\n\
             RETURN {\n\
             \tmodel: 'production',\n\
             \tuuid: production.uuid,\n\
             \tname: production.name,\n\
             \ttheatre: CASE WHEN theatre IS NULL THEN NULL ELSE {\n\
             \t\tname: theatre.name,\n\
             \t\tdifferentiator: COALESCE(theatre.differentiator, '')\n\
             \t} END,\n\
             \tplaytext: CASE WHEN playtext IS NULL THEN NULL ELSE {\n\
             \t\tname: playtext.name,\n\
             \t\tdifferentiator: COALESCE(playtext.differentiator, '')\n\
             \t} END,\n\
             \tcast: [entry IN COLLECT(\n\
             \t\tCASE WHEN person IS NULL THEN NULL ELSE {\n\
             \t\t\tname: person.name,\n\
             \t\t\troles: COALESCE(performance.roles, '[]')\n\
             \t\t} END\n\
             \t) WHERE entry IS NOT NULL]\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

/// Guarded delete: the theatre, playtext, and cast are all required
/// associations, so any of them blocks deletion. Blocking kinds are
/// reported capitalized, in alphabetical order.
pub fn delete() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (n:Production { uuid: $uuid })\n\
             OPTIONAL MATCH (n)-[:PLAYS_AT]->(theatre:Theatre)\n\
             OPTIONAL MATCH (n)-[:PRODUCTION_OF]->(playtext:Playtext)\n\
             OPTIONAL MATCH (person:Person)-[:PERFORMS_IN]->(n)\n\
             WITH n, theatre, playtext, COUNT(DISTINCT person) AS person_count\n\
             WITH n, n.name AS name,\n\
             \tCASE WHEN person_count > 0 THEN ['Person'] ELSE [] END +\n\
             \tCASE WHEN playtext IS NULL THEN [] ELSE ['Playtext'] END +\n\
             \tCASE WHEN theatre IS NULL THEN [] ELSE ['Theatre'] END AS associations\n\
             FOREACH (_ IN CASE WHEN associations = [] THEN [1] ELSE [] END | DETACH DELETE n)\n\
             RETURN {\n\
             \tmodel: 'production',\n\
             \tuuid: CASE WHEN associations = [] THEN NULL ELSE $uuid END,\n\
             \tname: name,\n\
             \tassociations: associations\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

/// Production with its theatre, playtext, and cast.
pub fn show() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (production:Production { uuid: $uuid })\n\
             OPTIONAL MATCH (production)-[:PLAYS_AT]->(theatre:Theatre)\n\
             OPTIONAL MATCH (production)-[:PRODUCTION_OF]->(playtext:Playtext)\n\
             OPTIONAL MATCH (person:Person)-[performance:PERFORMS_IN]->(production)\n\
             WITH production, theatre, playtext, person, performance\n\
             \tORDER BY performance.position\n\
             RETURN {\n\
             \tmodel: 'production',\n\
             \tuuid: production.uuid,\n\
             \tname: production.name,\n\
             \ttheatre: CASE WHEN theatre IS NULL THEN NULL ELSE {\n\
             \t\tmodel: 'theatre',\n\
             \t\tuuid: theatre.uuid,\n\
             \t\tname: theatre.name\n\
             \t} END,\n\
             \tplaytext: CASE WHEN playtext IS NULL THEN NULL ELSE {\n\
             \t\tmodel: 'playtext',\n\
             \t\tuuid: playtext.uuid,\n\
             \t\tname: playtext.name\n\
             \t} END,\n\
             \tcast: [entry IN COLLECT(\n\
             \t\tCASE WHEN person IS NULL THEN NULL ELSE {\n\
             \t\t\tmodel: 'person',\n\
             \t\t\tuuid: person.uuid,\n\
             \t\t\tname: person.name,\n\
             \t\t\troles: COALESCE(performance.roles, '[]')\n\
             \t\t} END\n\
             \t) WHERE entry IS NOT NULL]\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

/// Production summaries embed their theatre summary.
pub fn list() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (n:Production)\n\
             OPTIONAL MATCH (n)-[:PLAYS_AT]->(theatre:Theatre)\n\
             RETURN {\n\
             \tmodel: 'production',\n\
             \tuuid: n.uuid,\n\
             \tname: n.name,\n\
             \ttheatre: CASE WHEN theatre IS NULL THEN NULL ELSE {\n\
             \t\tmodel: 'theatre',\n\
             \t\tuuid: theatre.uuid,\n\
             \t\tname: theatre.name\n\
             \t} END\n\
             } AS instance"
            .to_string(),
        parameters: &[],
        output: INSTANCE,
    }
}
