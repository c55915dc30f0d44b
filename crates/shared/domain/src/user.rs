//! User entity and the authentication payloads around it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_NORMAL_USER, VALID_ROLES};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "ROLE_NORMAL_USER")]
    NormalUser,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Wire value of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::NormalUser => ROLE_NORMAL_USER,
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    /// Accepts the wire value or the short form (`admin`, `user`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            ROLE_ADMIN | "ADMIN" => Ok(UserRole::Admin),
            ROLE_NORMAL_USER | "USER" | "NORMAL_USER" => Ok(UserRole::NormalUser),
            _ => Err(DomainError::invalid_value("role", s, VALID_ROLES)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    /// Profile fields may be absent for accounts created before they existed
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    pub role: UserRole,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// First and last name joined, falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Partial user sent to the update endpoints.
///
/// Absent fields are left out of the JSON body so the service keeps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// New role (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UserUpdate {
    /// Check whether the update carries no field at all
    pub fn is_empty(&self) -> bool {
        self == &UserUpdate::default()
    }
}

/// Registration payload
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

// Don't expose the password in debug output
impl std::fmt::Debug for SignupData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupData")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// Login payload
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Password change payload
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordUpdate")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login: an opaque bearer token and the signed-in user
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user_json() -> serde_json::Value {
        serde_json::json!({
            "id": "8d3c",
            "email": "jane@example.com",
            "username": "jane",
            "firstName": "Jane",
            "lastName": "Doe",
            "phoneNumber": "555-0100",
            "role": "ROLE_ADMIN"
        })
    }

    #[test]
    fn test_user_decodes_camel_case() {
        let user: User = serde_json::from_value(sample_user_json()).unwrap();

        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.phone_number, "555-0100");
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "Jane Doe");
    }

    #[test]
    fn test_user_without_profile_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1",
            "email": "a@b.co",
            "username": "abc",
            "role": "ROLE_NORMAL_USER"
        }))
        .unwrap();

        assert_eq!(user.first_name, "");
        assert_eq!(user.display_name(), "abc");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut json = sample_user_json();
        json["role"] = serde_json::json!("ROLE_ROOT");

        assert!(serde_json::from_value::<User>(json).is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("ROLE_ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::NormalUser);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_update_omits_absent_fields() {
        let update = UserUpdate {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "firstName": "Jane" }));
        assert!(!update.is_empty());
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("u", "hunter22");
        let debug = format!("{:?}", credentials);

        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_password_update_wire_format() {
        let update = PasswordUpdate {
            current_password: "old".to_string(),
            new_password: "abc123".to_string(),
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "currentPassword": "old", "newPassword": "abc123" })
        );
    }
}
