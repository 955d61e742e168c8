//! Mapping of `validator` failures into application errors.

use validator::{Validate, ValidationErrors};

use expiry_core::error::AppError;

/// Validate `input`, turning field errors into a single validation error.
pub(crate) fn validate<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{field}: {detail}")
        })
        .collect();
    fields.sort();
    AppError::validation(fields.join("; "))
}
