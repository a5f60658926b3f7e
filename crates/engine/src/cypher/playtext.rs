//! Playtext-specific templates: writes carry the billed-character group.
//!
//! Nested members arrive as parallel string lists (`$character_names[i]`,
//! `$character_differentiators[i]`, ...) so the statement can `UNWIND` a
//! position range; a `[NULL]` sentinel keeps the `UNWIND` alive when the
//! group is empty so the write still returns its projection row.

use playbill_domain::Kind;

use super::{shared, QueryTemplate, INSTANCE};

const WRITE_PARAMETERS: &[&str] = &[
    "uuid",
    "name",
    "differentiator",
    "character_names",
    "character_differentiators",
    "character_qualifiers",
    "character_uuids",
];

/// Attach fragment shared by create and update: merge each billed
/// character by identity and link it with its position and qualifier.
fn attach_characters() -> &'static str {
    "UNWIND (CASE WHEN $character_names = [] THEN [NULL] ELSE RANGE(0, SIZE($character_names) - 1) END) AS position\n\
     FOREACH (_ IN CASE WHEN position IS NULL THEN [] ELSE [1] END |\n\
     \tMERGE (character:Character {\n\
     \t\tname: $character_names[position],\n\
     \t\tdifferentiator: $character_differentiators[position]\n\
     \t})\n\
     \t\tON CREATE SET character.uuid = $character_uuids[position]\n\
     \tCREATE (playtext)-[:INCLUDES_CHARACTER {\n\
     \t\tposition: position,\n\
     \t\tqualifier: $character_qualifiers[position]\n\
     \t}]->(character)\n\
     )\n\
     WITH DISTINCT playtext\n\
     RETURN {\n\
     \tmodel: 'playtext',\n\
     \tuuid: playtext.uuid,\n\
     \tname: playtext.name,\n\
     \tdifferentiator: playtext.differentiator\n\
     } AS instance"
}

pub fn create() -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "CREATE (playtext:Playtext {{ uuid: $uuid, name: $name, differentiator: $differentiator }})\n\
             WITH playtext\n\
             {attach}",
            attach = attach_characters()
        ),
        parameters: WRITE_PARAMETERS,
        output: INSTANCE,
    }
}

/// Billings are re-linked by detach-and-reattach, never merged.
pub fn update() -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "MATCH (playtext:Playtext {{ uuid: $uuid }})\n\
             \tSET playtext.name = $name, playtext.differentiator = $differentiator\n\
             WITH playtext\n\
             OPTIONAL MATCH (playtext)-[billing:INCLUDES_CHARACTER]->(:Character)\n\
             DELETE billing\n\
             WITH DISTINCT playtext\n\
             {attach}",
            attach = attach_characters()
        ),
        parameters: WRITE_PARAMETERS,
        output: INSTANCE,
    }
}

/// Pre-fill fetch including the billed characters in position order.
pub fn edit() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (playtext:Playtext { uuid: $uuid })\n\
             OPTIONAL MATCH (playtext)-[billing:INCLUDES_CHARACTER]->(character:Character)\n\
             WITH playtext, billing, character\n\
             \tORDER BY billing.position\n\
             RETURN {\n\
             \tmodel: 'playtext',\n\
             \tuuid: playtext.uuid,\n\
             \tname: playtext.name,\n\
             \tdifferentiator: COALESCE(playtext.differentiator, ''),\n\
             \tcharacters: [entry IN COLLECT(\n\
             \t\tCASE WHEN character IS NULL THEN NULL ELSE {\n\
             \t\t\tname: character.name,\n\
             \t\t\tdifferentiator: COALESCE(character.differentiator, ''),\n\
             \t\t\tqualifier: COALESCE(billing.qualifier, '')\n\
             \t\t} END\n\
             \t) WHERE entry IS NOT NULL]\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

/// Delete is blocked while any production is a production of the playtext.
pub fn delete() -> QueryTemplate {
    shared::delete_guarded_by_dependents(
        Kind::Playtext,
        Kind::Production,
        "(n)<-[:PRODUCTION_OF]-(dependent:Production)",
    )
}

/// Playtext with its billed characters and its productions.
pub fn show() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (playtext:Playtext { uuid: $uuid })\n\
             OPTIONAL MATCH (playtext)-[billing:INCLUDES_CHARACTER]->(character:Character)\n\
             WITH playtext, billing, character\n\
             \tORDER BY billing.position\n\
             WITH playtext, [entry IN COLLECT(\n\
             \t\tCASE WHEN character IS NULL THEN NULL ELSE {\n\
             \t\t\tmodel: 'character',\n\
             \t\t\tuuid: character.uuid,\n\
             \t\t\tname: character.name,\n\
             \t\t\tqualifier: COALESCE(billing.qualifier, '')\n\
             \t\t} END\n\
             \t) WHERE entry IS NOT NULL] AS characters\n\
             OPTIONAL MATCH (playtext)<-[:PRODUCTION_OF]-(production:Production)\n\
             OPTIONAL MATCH (production)-[:PLAYS_AT]->(theatre:Theatre)\n\
             WITH playtext, characters, production, theatre\n\
             \tORDER BY production.name\n\
             RETURN {\n\
             \tmodel: 'playtext',\n\
             \tuuid: playtext.uuid,\n\
             \tname: playtext.name,\n\
             \tdifferentiator: COALESCE(playtext.differentiator, ''),\n\
             \tcharacters: characters,\n\
             \tproductions: [entry IN COLLECT(\n\
             \t\tCASE WHEN production IS NULL THEN NULL ELSE {\n\
             \t\t\tmodel: 'production',\n\
             \t\t\tuuid: production.uuid,\n\
             \t\t\tname: production.name,\n\
             \t\t\ttheatre: CASE WHEN theatre IS NULL THEN NULL ELSE {\n\
             \t\t\t\tmodel: 'theatre',\n\
             \t\t\t\tuuid: theatre.uuid,\n\
             \t\t\t\tname: theatre.name\n\
             \t\t\t} END\n\
             \t\t} END\n\
             \t) WHERE entry IS NOT NULL]\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}
