//! Client-side form schemas.
//!
//! Forms are validated with `validator` before anything is sent. A failing
//! form becomes [`AppError::Validation`] with one message per field, and a
//! valid form converts into the request DTO of its endpoint.

mod auth;
mod password;
mod profile;

pub use auth::{LoginForm, SignupForm};
pub use password::PasswordChangeForm;
pub use profile::ProfileForm;

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use common::{AppError, AppResult, FieldErrors};
use domain::MIN_PASSWORD_LENGTH;

/// Error code used by every "field is required" rule
pub(crate) const REQUIRED: &str = "required";

/// Validate a form and collect the first relevant message of each field.
///
/// When a field breaks several rules, the "required" one wins so an empty
/// input is reported as missing rather than malformed.
pub fn validate_form<T: Validate>(form: &T) -> AppResult<()> {
    let Err(errors) = form.validate() else {
        return Ok(());
    };

    let mut fields = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let chosen = field_errors
            .iter()
            .find(|e| e.code == REQUIRED)
            .or_else(|| field_errors.first());

        if let Some(error) = chosen {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            fields.add(wire_name(&field), message);
        }
    }

    Err(AppError::Validation(fields))
}

/// Password length rule. Empty values are left to the required rule.
pub(crate) fn password_length(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().count() as u64 >= MIN_PASSWORD_LENGTH {
        return Ok(());
    }

    let mut error = ValidationError::new("length");
    error.message = Some(Cow::Owned(format!(
        "Password must be at least {} characters",
        MIN_PASSWORD_LENGTH
    )));
    Err(error)
}

/// `first_name` -> `firstName`
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name() {
        assert_eq!(wire_name("first_name"), "firstName");
        assert_eq!(wire_name("confirm_password"), "confirmPassword");
        assert_eq!(wire_name("email"), "email");
    }

    #[test]
    fn test_password_length() {
        assert!(password_length("").is_ok());
        assert!(password_length("abc123").is_ok());

        let err = password_length("abc12").unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }
}
