//! Bridges `validator` derive output into [`FieldViolation`] lists.
//!
//! Request DTOs declare their rules with `#[derive(Validate)]`; handlers
//! call [`validate_payload`] so every failing field is reported at once.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldViolation};

/// Field name used for the path identifier of a resource.
pub const ID_FIELD: &str = "id";

/// Run the declarative rules on `payload`, collecting all violations.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), CoreError> {
    payload
        .validate()
        .map_err(|errors| CoreError::Validation(collect_violations(&errors)))
}

/// Flatten `validator` errors into camelCase field violations, sorted by
/// field name so responses are stable.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            errs.iter().map(move |e| FieldViolation {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// Validate a resource identifier taken from the request path.
pub fn validate_id(id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::invalid(ID_FIELD, "ID must be a valid string"));
    }
    Ok(())
}

/// Build a [`ValidationError`] carrying a human-readable message.
pub(crate) fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Check that `value` is non-blank and at most `max` characters once trimmed.
pub(crate) fn check_trimmed_length(
    value: &str,
    max: usize,
    required_message: &'static str,
    length_message: &'static str,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rule_error("required", required_message));
    }
    if trimmed.chars().count() > max {
        return Err(rule_error("length", length_message));
    }
    Ok(())
}

/// Convert a snake_case struct field name to its camelCase wire name.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
