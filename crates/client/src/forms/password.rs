//! Password change form.

use serde::Deserialize;
use validator::Validate;

use common::AppResult;
use domain::PasswordUpdate;

use super::{password_length, validate_form};

/// Current password plus a new password typed twice
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeForm {
    #[validate(length(min = 1, code = "required", message = "Current password is required"))]
    pub current_password: String,

    #[validate(
        length(min = 1, code = "required", message = "New password is required"),
        custom(function = "password_length")
    )]
    pub new_password: String,

    #[validate(
        length(min = 1, code = "required", message = "Please confirm your password"),
        must_match(other = "new_password", message = "Passwords must match")
    )]
    pub confirm_password: String,
}

impl PasswordChangeForm {
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Validate and build the update body. The confirmation is not sent.
    pub fn into_update(self) -> AppResult<PasswordUpdate> {
        validate_form(&self)?;

        Ok(PasswordUpdate {
            current_password: self.current_password,
            new_password: self.new_password,
        })
    }
}

impl std::fmt::Debug for PasswordChangeForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChangeForm")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{AppError, FieldErrors};

    fn field_errors(form: PasswordChangeForm) -> FieldErrors {
        match form.into_update() {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_minimum_length() {
        let errors = field_errors(PasswordChangeForm::new("old-secret", "abc12", "abc12"));
        assert_eq!(
            errors.get("newPassword"),
            Some("Password must be at least 6 characters")
        );

        let update = PasswordChangeForm::new("old-secret", "abc123", "abc123")
            .into_update()
            .unwrap();
        assert_eq!(update.new_password, "abc123");
        assert_eq!(update.current_password, "old-secret");
    }

    #[test]
    fn test_mismatch_rejected() {
        let errors = field_errors(PasswordChangeForm::new("old-secret", "abc123", "abc124"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_mismatch_reported_alongside_other_errors() {
        let errors = field_errors(PasswordChangeForm::new("", "abc", "xyz"));

        assert_eq!(errors.get("currentPassword"), Some("Current password is required"));
        assert_eq!(
            errors.get("newPassword"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
    }

    #[test]
    fn test_empty_fields_report_required() {
        let errors = field_errors(PasswordChangeForm::default());

        assert_eq!(errors.get("newPassword"), Some("New password is required"));
        assert_eq!(errors.get("confirmPassword"), Some("Please confirm your password"));
    }

    #[test]
    fn test_debug_redacts() {
        let form = PasswordChangeForm::new("old-secret", "abc123", "abc123");
        let debug = format!("{:?}", form);
        assert!(!debug.contains("old-secret"));
        assert!(!debug.contains("abc123"));
    }
}
