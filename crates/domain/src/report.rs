//! Validation report values.

use std::collections::BTreeMap;

use serde::Serialize;

/// An immutable-by-convention mapping of field name to error messages.
///
/// Each validation pass builds a fresh report and merges it into the entity
/// it returns; nothing accumulates across passes. Field keys are the fixed
/// vocabulary of the response bodies (`name`, `differentiator`, `qualifier`,
/// `characterName`, `associations`, `dependentAssociations`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport(BTreeMap<&'static str, Vec<String>>);

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under a field, creating the entry if absent.
    /// Existing messages are never overwritten.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Combine two reports, appending the other's messages after this one's.
    pub fn merged(mut self, other: ValidationReport) -> Self {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
        self
    }

    /// True when no field carries any message.
    pub fn is_clean(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}
