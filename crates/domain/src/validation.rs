//! Scalar string validation.

/// Maximum length for any free-text field, required or not.
pub const STRING_MAX_LENGTH: usize = 1000;

/// Options for a single string check.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringOpts {
    pub is_required: bool,
}

/// A single string constraint violation.
///
/// At most one violation is reported per check; the display strings are the
/// exact messages surfaced in validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StringViolation {
    #[error("Value is too short")]
    TooShort,
    #[error("Value is too long")]
    TooLong,
}

/// Validate a scalar string field.
///
/// `None` is treated as the empty string. An empty value violates the
/// minimum length only when the field is required; a value over
/// [`STRING_MAX_LENGTH`] characters is always too long. Callers are
/// expected to trim before validating; no normalization happens here.
pub fn validate_string(value: Option<&str>, opts: StringOpts) -> Option<StringViolation> {
    let value = value.unwrap_or_default();

    if opts.is_required && value.is_empty() {
        return Some(StringViolation::TooShort);
    }

    if value.chars().count() > STRING_MAX_LENGTH {
        return Some(StringViolation::TooLong);
    }

    None
}
