//! Sign-in and registration forms.

use serde::Deserialize;
use validator::Validate;

use common::AppResult;
use domain::{Credentials, SignupData};

use super::{password_length, validate_form};

#[derive(Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, code = "required", message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, code = "required", message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn into_credentials(self) -> AppResult<Credentials> {
        validate_form(&self)?;
        Ok(Credentials::new(self.username, self.password))
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form; every field is required
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(
        length(min = 1, code = "required", message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(length(min = 1, code = "required", message = "Username is required"))]
    pub username: String,

    #[validate(
        length(min = 1, code = "required", message = "Password is required"),
        custom(function = "password_length")
    )]
    pub password: String,

    #[validate(length(min = 1, code = "required", message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, code = "required", message = "Last name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, code = "required", message = "Phone number is required"))]
    pub phone_number: String,
}

impl SignupForm {
    pub fn into_signup(self) -> AppResult<SignupData> {
        validate_form(&self)?;

        Ok(SignupData {
            email: self.email,
            username: self.username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
        })
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    fn signup_form() -> SignupForm {
        SignupForm {
            email: "grace@example.com".to_string(),
            username: "grace".to_string(),
            password: "cobol-1959".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone_number: "555-0199".to_string(),
        }
    }

    #[test]
    fn test_login_form() {
        let credentials = LoginForm::new("grace", "secret").into_credentials().unwrap();
        assert_eq!(credentials, Credentials::new("grace", "secret"));

        match LoginForm::new("grace", "").into_credentials() {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get("password"), Some("Password is required"));
                assert_eq!(errors.get("username"), None);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_signup_form() {
        let data = signup_form().into_signup().unwrap();
        assert_eq!(data.username, "grace");
        assert_eq!(data.phone_number, "555-0199");
    }

    #[test]
    fn test_signup_short_password() {
        let form = SignupForm {
            password: "short".to_string(),
            ..signup_form()
        };

        match form.into_signup() {
            Err(AppError::Validation(errors)) => {
                assert_eq!(
                    errors.get("password"),
                    Some("Password must be at least 6 characters")
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
