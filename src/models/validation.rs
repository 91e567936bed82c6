//! Field checks shared by the request models.

use validator::ValidateEmail;

use crate::errors::AppError;

/// Require `value` (trimmed) to hold at least `min` characters.
pub fn require_min_len(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.trim().chars().count() < min {
        return Err(AppError::Validation(format!(
            "{} must have at least {} characters",
            field, min
        )));
    }
    Ok(())
}

/// Require `value` (trimmed) to hold at most `max` characters.
pub fn require_max_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must have at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Require a well-formed email address.
pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
    if is_valid_email(value.trim()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} must be a valid email address",
            field
        )))
    }
}

/// Require a counter value that is not negative.
pub fn require_non_negative(field: &str, value: i64) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}

/// Require a counter value no larger than `max`.
pub fn require_at_most(field: &str, value: i64, max: i64) -> Result<(), AppError> {
    if value > max {
        return Err(AppError::Validation(format!(
            "{} must not exceed {}",
            field, max
        )));
    }
    Ok(())
}

/// `validator`'s address check, plus the stricter shape the forms always enforced:
/// a dot-atom local part and a domain with at least one dot.
fn is_valid_email(value: &str) -> bool {
    if !value.validate_email() {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    let dot_atom = !local.starts_with('.') && !local.ends_with('.') && !local.contains("..");
    dot_atom && domain.contains('.')
}
