//! Shared validation rules.
//!
//! Rules only report an error *kind* (the `validator` error code: `required`,
//! `invalid`, `min_length`, `mismatch`). Turning a kind into a sentence happens at
//! presentation time, see [`crate::i18n::translate_errors`].

use validator::{ValidationError, ValidationErrors};

pub const REQUIRED: &str = "required";
pub const INVALID: &str = "invalid";
pub const MIN_LENGTH: &str = "min_length";
pub const MISMATCH: &str = "mismatch";

pub const PASSWORD_MIN_LENGTH: usize = 6;

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(REQUIRED));
    }
    Ok(())
}

/// Like [`required`], but whitespace alone does not count as a value.
pub fn required_trimmed(value: &str) -> Result<(), ValidationError> {
    required(value.trim())
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if !validator::validate_email(value) {
        return Err(ValidationError::new(INVALID));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        let mut error = ValidationError::new(MIN_LENGTH);
        error.add_param("min".into(), &PASSWORD_MIN_LENGTH);
        return Err(error);
    }
    Ok(())
}

pub fn accepted(value: bool) -> Result<(), ValidationError> {
    if !value {
        return Err(ValidationError::new(REQUIRED));
    }
    Ok(())
}

/// A single-field error set, for rules checked outside the derive.
pub fn field_error(field: &'static str, code: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    errors
}

/// Turns the outcome of a derive-based check into an owned error set so extra
/// cross-field errors can be added to it.
pub fn collect(result: Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_default()
}

/// `Ok` when no field carries an error.
pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The first error code reported for `field`, if any.
pub fn first_code(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|list| list.first())
        .map(|error| error.code.to_string())
}
