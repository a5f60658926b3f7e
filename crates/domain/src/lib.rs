//! Playbill domain library.
//!
//! Pure entity layer for the theatrical-production graph: the seven entity
//! kinds, their scalar and cross-field validation rules, positional duplicate
//! detection over nested groups, and the validation report values the rules
//! produce. No I/O lives here; persistence is the engine crate's concern.

pub mod duplicates;
pub mod entities;
pub mod kind;
pub mod report;
pub mod validation;

pub use entities::{
    CastMember, Character, Person, Playtext, PlaytextCharacter, PlaytextRef, Production, Role,
    Theatre, TheatreRef,
};
pub use kind::Kind;
pub use report::ValidationReport;
