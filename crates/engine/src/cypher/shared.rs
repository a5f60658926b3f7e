//! Templates shared across entity kinds.

use playbill_domain::Kind;

use super::{QueryTemplate, INSTANCE, INSTANCE_COUNT};

/// Uniqueness check for a candidate `(name[, differentiator])`.
///
/// The candidate's own node is excluded through an empty-string sentinel so
/// updating an entity to its current name never self-triggers a conflict.
/// The differentiator comparison coalesces so nodes persisted without the
/// property still participate. Returns the count clamped to {0, 1}.
pub fn uniqueness(kind: Kind) -> QueryTemplate {
    if kind.has_differentiator() {
        QueryTemplate {
            statement: format!(
                "MATCH (n:{label} {{ name: $name }})\n\
                 \tWHERE ($uuid = '' OR n.uuid <> $uuid)\n\
                 \t\tAND COALESCE(n.differentiator, '') = $differentiator\n\
                 RETURN SIGN(COUNT(n)) AS instance_count",
                label = kind.label()
            ),
            parameters: &["uuid", "name", "differentiator"],
            output: INSTANCE_COUNT,
        }
    } else {
        QueryTemplate {
            statement: format!(
                "MATCH (n:{label} {{ name: $name }})\n\
                 \tWHERE ($uuid = '' OR n.uuid <> $uuid)\n\
                 RETURN SIGN(COUNT(n)) AS instance_count",
                label = kind.label()
            ),
            parameters: &["uuid", "name"],
            output: INSTANCE_COUNT,
        }
    }
}

/// Scalar-only create for kinds without nested groups.
pub fn create(kind: Kind) -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "CREATE (n:{label} {{ uuid: $uuid, name: $name, differentiator: $differentiator }})\n\
             RETURN {{\n\
             \tmodel: '{model}',\n\
             \tuuid: n.uuid,\n\
             \tname: n.name,\n\
             \tdifferentiator: n.differentiator\n\
             }} AS instance",
            label = kind.label(),
            model = kind.model()
        ),
        parameters: &["uuid", "name", "differentiator"],
        output: INSTANCE,
    }
}

/// By-uuid fetch of the scalar projection for form pre-fill.
pub fn edit(kind: Kind) -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "MATCH (n:{label} {{ uuid: $uuid }})\n\
             RETURN {{\n\
             \tmodel: '{model}',\n\
             \tuuid: n.uuid,\n\
             \tname: n.name,\n\
             \tdifferentiator: COALESCE(n.differentiator, '')\n\
             }} AS instance",
            label = kind.label(),
            model = kind.model()
        ),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

/// Scalar-only update for kinds without nested groups.
pub fn update(kind: Kind) -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "MATCH (n:{label} {{ uuid: $uuid }})\n\
             \tSET n.name = $name, n.differentiator = $differentiator\n\
             RETURN {{\n\
             \tmodel: '{model}',\n\
             \tuuid: n.uuid,\n\
             \tname: n.name,\n\
             \tdifferentiator: n.differentiator\n\
             }} AS instance",
            label = kind.label(),
            model = kind.model()
        ),
        parameters: &["uuid", "name", "differentiator"],
        output: INSTANCE,
    }
}

/// Guarded delete for a kind whose deletion is blocked by a dependent
/// association. The node is detach-deleted only when no dependent exists;
/// either way one projection row comes back, carrying the dependent kind
/// (plural, lower-case) when the delete was blocked, and the uuid only
/// when the node survived.
pub fn delete_guarded_by_dependents(
    kind: Kind,
    dependent: Kind,
    pattern: &str,
) -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "MATCH (n:{label} {{ uuid: $uuid }})\n\
             OPTIONAL MATCH {pattern}\n\
             WITH n, n.name AS name, COALESCE(n.differentiator, '') AS differentiator,\n\
             \tCOUNT(dependent) AS dependent_count\n\
             FOREACH (_ IN CASE WHEN dependent_count = 0 THEN [1] ELSE [] END | DETACH DELETE n)\n\
             RETURN {{\n\
             \tmodel: '{model}',\n\
             \tuuid: CASE WHEN dependent_count = 0 THEN NULL ELSE $uuid END,\n\
             \tname: name,\n\
             \tdifferentiator: differentiator,\n\
             \tdependentAssociations: CASE WHEN dependent_count = 0 THEN [] ELSE ['{plural}'] END\n\
             }} AS instance",
            label = kind.label(),
            model = kind.model(),
            plural = dependent.plural()
        ),
        parameters: &["uuid"],
        output: INSTANCE,
    }
}

/// One summary row per node of the kind, in store order.
pub fn list(kind: Kind) -> QueryTemplate {
    QueryTemplate {
        statement: format!(
            "MATCH (n:{label})\n\
             RETURN {{\n\
             \tmodel: '{model}',\n\
             \tuuid: n.uuid,\n\
             \tname: n.name,\n\
             \tdifferentiator: COALESCE(n.differentiator, '')\n\
             }} AS instance",
            label = kind.label(),
            model = kind.model()
        ),
        parameters: &[],
        output: INSTANCE,
    }
}
