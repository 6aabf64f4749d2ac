//! Input validation utilities.
//!
//! Centralized precondition checks run by the API client before a request is
//! built.

use validator::Validate;

use crate::error::ValidationError;

/// Validate a request payload, returning a [`ValidationError::Invalid`] on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), ValidationError> {
    body.validate().map_err(|e| ValidationError::Invalid {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Require an identifier to be present and non-blank.
pub fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

/// [`require`] for arguments that are always passed but may be empty.
pub fn require_str<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    require(field, Some(value))
}

/// Drop everything after the first `?`; slugs sometimes arrive with the
/// page's query string still attached.
pub fn strip_query(slug: &str) -> &str {
    slug.split('?').next().unwrap_or_default()
}
