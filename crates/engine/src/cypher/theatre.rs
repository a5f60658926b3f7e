//! Theatre-specific templates.

use playbill_domain::Kind;

use super::{shared, QueryTemplate, INSTANCE};

/// Delete is blocked while any production still plays at the theatre.
pub fn delete() -> QueryTemplate {
    shared::delete_guarded_by_dependents(
        Kind::Theatre,
        Kind::Production,
        "(n)<-[:PLAYS_AT]-(dependent:Production)",
    )
}

/// Theatre with its production summaries.
pub fn show() -> QueryTemplate {
    QueryTemplate {
        statement: "MATCH (theatre:Theatre { uuid: $uuid })\n\
             OPTIONAL MATCH (theatre)<-[:PLAYS_AT]-(production:Production)\n\
             WITH theatre, production\n\
             \tORDER BY production.name\n\
             RETURN {\n\
             \tmodel: 'theatre',\n\
             \tuuid: theatre.uuid,\n\
             \tname: theatre.name,\n\
             \tdifferentiator: COALESCE(theatre.differentiator, ''),\n\
             \tproductions: [production IN COLLECT(production) | {\n\
             \t\tmodel: 'production',\n\
             \t\tuuid: production.uuid,\n\
             \t\tname: production.name\n\
             \t}]\n\
             } AS instance"
            .to_string(),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}
