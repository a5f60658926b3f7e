//! Character-specific templates.

use playbill_domain::Kind;

use super::{shared, QueryTemplate, INSTANCE};

/// Delete is blocked while any playtext still bills the character.
pub fn delete() -> QueryTemplate {
    shared::delete_guarded_by_dependents(
        Kind::Character,
        Kind::Playtext,
        "(n)<-[:INCLUDES_CHARACTER]-(dependent:Playtext)",
    )
}

/// Character with the playtexts billing it and the performances of it.
pub fn show() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (character:Character { uuid: $uuid })\n\
             OPTIONAL MATCH (character)<-[:INCLUDES_CHARACTER]-(playtext:Playtext)\n\
             WITH character, playtext\n\
             \tORDER BY playtext.name\n\
             WITH character, [playtext IN COLLECT(playtext) | {\n\
             \t\tmodel: 'playtext',\n\
             \t\tuuid: playtext.uuid,\n\
             \t\tname: playtext.name\n\
             \t}] AS playtexts\n\
             OPTIONAL MATCH (character)<-[performance:PERFORMS_AS]-(person:Person)\n\
             OPTIONAL MATCH (production:Production { uuid: performance.production_uuid })\n\
             OPTIONAL MATCH (production)-[:PLAYS_AT]->(theatre:Theatre)\n\
             WITH character, playtexts, performance, person, production, theatre\n\
             \tORDER BY production.name, person.name\n\
             RETURN {\n\
             \tmodel: 'character',\n\
             \tuuid: character.uuid,\n\
             \tname: character.name,\n\
             \tdifferentiator: COALESCE(character.differentiator, ''),\n\
             \tplaytexts: playtexts,\n\
             \tperformances: [entry IN COLLECT(\n\
             \t\tCASE WHEN person IS NULL THEN NULL ELSE {\n\
             \t\t\tmodel: 'person',\n\
             \t\t\tuuid: person.uuid,\n\
             \t\t\tname: person.name,\n\
             \t\t\troleName: performance.role_name,\n\
             \t\t\tproduction: CASE WHEN production IS NULL THEN NULL ELSE {\n\
             \t\t\t\tmodel: 'production',\n\
             \t\t\t\tuuid: production.uuid,\n\
             \t\t\t\tname: production.name,\n\
             \t\t\t\ttheatre: CASE WHEN theatre IS NULL THEN NULL ELSE {\n\
             \t\t\t\t\tmodel: 'theatre',\n\
             \t\t\t\t\tuuid: theatre.uuid,\n\
             \t\t\t\t\tname: theatre.name\n\
             \t\t\t\t} END\n\
             \t\t\t} END\n\
             \t\t} END\n\
             \t) WHERE entry IS NOT NULL]\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_embeds_playtexts_and_performances() {
        let template = show();
        assert!(template
            .statement
            .contains("(character)<-[:INCLUDES_CHARACTER]-(playtext:Playtext)"));
        assert!(template
            .statement
            .contains("(character)<-[performance:PERFORMS_AS]-(person:Person)"));
        assert!(template.statement.contains("roleName: performance.role_name"));
    }

    #[test]
    fn delete_is_guarded_by_playtexts() {
        assert!(delete().statement.contains("['playtexts']"));
    }
}
