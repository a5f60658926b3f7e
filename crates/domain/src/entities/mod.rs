//! Entity kinds and their validation rules.
//!
//! Each top-level kind exposes a single local-validation entry point,
//! `validated(self) -> Self`, which trims scalar fields, rebuilds the
//! entity's own report, and revalidates nested group members with their
//! positional duplicate flags. Member errors stay on the member; a parent's
//! `has_errors()` ORs across itself and everything nested under it.

mod character;
mod person;
mod playtext;
mod production;
mod theatre;

pub use character::Character;
pub use person::Person;
pub use playtext::{Playtext, PlaytextCharacter};
pub use production::{CastMember, PlaytextRef, Production, Role, TheatreRef};
pub use theatre::Theatre;

use crate::report::ValidationReport;
use crate::validation::{validate_string, StringOpts};

/// Message attached when an entity of a differentiator-bearing kind
/// collides with a persisted `(name, differentiator)` pair.
pub const NAME_AND_DIFFERENTIATOR_EXISTS: &str =
    "Name and differentiator combination already exists";

/// Message attached when a production collides with a persisted name.
pub const NAME_EXISTS: &str = "Name already exists";

pub(crate) const NAME_DUPLICATED_IN_GROUP: &str = "Name has been duplicated in this group";
pub(crate) const NAME_REQUIRED_IF_NAMED_ROLES: &str =
    "Name is required if cast member has named roles";
pub(crate) const ROLE_NAME_REQUIRED_IF_CHARACTER_NAME: &str =
    "Role name is required if character name is present";
pub(crate) const CHARACTER_NAME_MUST_DIFFER: &str =
    "Character name is only required if different from role name";

/// Run the scalar validator over one field, recording any violation.
pub(crate) fn check_string(
    report: &mut ValidationReport,
    field: &'static str,
    value: &str,
    is_required: bool,
) {
    if let Some(violation) = validate_string(Some(value), StringOpts { is_required }) {
        report.add(field, violation.to_string());
    }
}

/// Comparison key for a group member keyed by name alone: `None` when the
/// trimmed name is empty, so blank members are never flagged as duplicates.
pub(crate) fn name_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn trimmed(value: &str) -> String {
    value.trim().to_string()
}
