//! Profile settings form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use common::AppResult;
use domain::{User, UserUpdate};

use super::validate_form;

/// Editable profile fields of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(min = 1, code = "required", message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, code = "required", message = "Last name is required"))]
    pub last_name: String,

    #[validate(
        length(min = 1, code = "required", message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(length(min = 1, code = "required", message = "Phone number is required"))]
    pub phone_number: String,
}

impl ProfileForm {
    /// Prefill the form from the stored user snapshot.
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
        }
    }

    /// Validate and build the update body.
    pub fn into_update(self) -> AppResult<UserUpdate> {
        validate_form(&self)?;

        Ok(UserUpdate {
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            email: Some(self.email),
            phone_number: Some(self.phone_number),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use domain::UserRole;

    fn valid_form() -> ProfileForm {
        ProfileForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "555-0100".to_string(),
        }
    }

    fn field_errors(result: AppResult<UserUpdate>) -> common::FieldErrors {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_form_builds_update() {
        let update = valid_form().into_update().unwrap();

        assert_eq!(update.first_name.as_deref(), Some("Ada"));
        assert_eq!(update.email.as_deref(), Some("ada@example.com"));
        assert_eq!(update.username, None);
        assert_eq!(update.role, None);
    }

    #[test]
    fn test_empty_first_name_is_required() {
        let form = ProfileForm {
            first_name: String::new(),
            ..valid_form()
        };

        let errors = field_errors(form.into_update());
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_email_rules() {
        let errors = field_errors(
            ProfileForm {
                email: String::new(),
                ..valid_form()
            }
            .into_update(),
        );
        assert_eq!(errors.get("email"), Some("Email is required"));

        let errors = field_errors(
            ProfileForm {
                email: "not-an-email".to_string(),
                ..valid_form()
            }
            .into_update(),
        );
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
    }

    #[test]
    fn test_all_fields_reported() {
        let errors = field_errors(ProfileForm::default().into_update());

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("lastName"), Some("Last name is required"));
        assert_eq!(errors.get("phoneNumber"), Some("Phone number is required"));
    }

    #[test]
    fn test_from_user() {
        let user = User {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone_number: String::new(),
            role: UserRole::NormalUser,
        };

        let form = ProfileForm::from_user(&user);
        assert_eq!(form.first_name, "Ada");
        assert!(form.phone_number.is_empty());
    }
}
