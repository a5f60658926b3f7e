//! Person-specific templates.

use playbill_domain::Kind;

use super::{shared, QueryTemplate, INSTANCE};

/// Delete is blocked while the person performs in any production.
pub fn delete() -> QueryTemplate {
    shared::delete_guarded_by_dependents(
        Kind::Person,
        Kind::Production,
        "(n)-[:PERFORMS_IN]->(dependent:Production)",
    )
}

/// Person with their production associations. The roles performed in each
/// production come back as the JSON-encoded `roles` edge property; the
/// service decodes them before the projection leaves the engine.
pub fn show() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (person:Person { uuid: $uuid })\n\
             OPTIONAL MATCH (person)-[performance:PERFORMS_IN]->(production:Production)\n\
             OPTIONAL MATCH (production)-[:PLAYS_AT]->(theatre:Theatre)\n\
             WITH person, performance, production, theatre\n\
             \tORDER BY production.name\n\
             RETURN {\n\
             \tmodel: 'person',\n\
             \tuuid: person.uuid,\n\
             \tname: person.name,\n\
             \tdifferentiator: COALESCE(person.differentiator, ''),\n\
             \tproductions: [entry IN COLLECT(\n\
             \t\tCASE WHEN production IS NULL THEN NULL ELSE {\n\
             \t\t\tmodel: 'production',\n\
             \t\t\tuuid: production.uuid,\n\
             \t\t\tname: production.name,\n\
             \t\t\ttheatre: CASE WHEN theatre IS NULL THEN NULL ELSE {\n\
             \t\t\t\tmodel: 'theatre',\n\
             \t\t\t\tuuid: theatre.uuid,\n\
             \t\t\t\tname: theatre.name\n\
             \t\t\t} END,\n\
             \t\t\troles: COALESCE(performance.roles, '[]')\n\
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
    fn show_embeds_productions_with_theatre_and_encoded_roles() {
        let template = show();
        assert!(template
            .statement
            .contains("(person)-[performance:PERFORMS_IN]->(production:Production)"));
        assert!(template
            .statement
            .contains("roles: COALESCE(performance.roles, '[]')"));
    }

    #[test]
    fn delete_is_guarded_by_productions_performed_in() {
        let template = delete();
        assert!(template
            .statement
            .contains("(n)-[:PERFORMS_IN]->(dependent:Production)"));
        assert!(template.statement.contains("['productions']"));
    }
}
