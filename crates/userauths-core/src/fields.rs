//! Field-level constraints shared by both records.

use crate::error::{Result, UserAuthsError};

pub const MAX_USERNAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_FULL_NAME_LENGTH: usize = 100;
pub const MAX_PHONE_LENGTH: usize = 15;
/// Applies to `gender`, `country`, `state` and `address`.
pub const MAX_SHORT_TEXT_LENGTH: usize = 100;

/// Returns true for `None` and for `Some("")`.
///
/// Only the empty string counts as blank; whitespace is a value.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Rejects values longer than `max` characters.
pub fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(UserAuthsError::invalid_field(
            field,
            format!("{} characters exceeds the maximum of {}", len, max),
        ));
    }
    Ok(())
}

/// [`check_length`] for optional fields.
pub fn check_optional_length(field: &'static str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) => check_length(field, value, max),
        None => Ok(()),
    }
}

/// Normalizes user-supplied optional text: empty input clears the field.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
