//! Unified error handling for the finance client.
//!
//! Provides a single error type covering:
//! - Form validation failures (caught before any request is sent)
//! - HTTP failures, including the 401 that ends a session
//! - Transport, decoding and local storage failures

use std::collections::BTreeMap;

use domain::DomainError;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Generic message shown when the server gave no explanation
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Per-field validation messages, keyed by the wire name of the field.
///
/// Only the first failing rule of each field is kept, which is what a form
/// shows next to the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field unless one is already present
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Message for a single field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),

    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden(Option<String>),

    // Resource errors
    #[error("Resource not found")]
    NotFound(Option<String>),

    #[error("Request failed with status {status}")]
    Api {
        status: u16,
        message: Option<String>,
    },

    // Transport
    #[error("Unable to reach the server: {0}")]
    Network(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    // Local state
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Files written on the user's behalf, such as report exports
    #[error("{0}")]
    File(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Build an error from a non-success HTTP response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = extract_message(body);
        match status {
            401 => AppError::Unauthorized,
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            _ => AppError::Api { status, message },
        }
    }

    /// Get error code for logs and scripts
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::Domain(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Api { .. } => "API_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::File(_) => "FILE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized => Some(401),
            AppError::Forbidden(_) => Some(403),
            AppError::NotFound(_) => Some(404),
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server put in the response body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Check if the error ended the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }

    /// Get user-facing message, using `fallback` when the server said nothing.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            // Client-side problems are already phrased for the user
            AppError::Validation(errors) => errors.to_string(),
            AppError::Domain(e) => e.to_string(),
            AppError::File(msg) => msg.clone(),
            AppError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            AppError::Network(e) => {
                tracing::debug!("Network error: {}", e);
                fallback.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                fallback.to_string()
            }
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Get user-facing message with the generic fallback
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_FAILURE_MESSAGE)
    }
}

/// Pull the `message` field out of a JSON error body.
///
/// Blank messages and bodies without one yield `None`. The `error` field
/// only holds the HTTP reason phrase and is ignored.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: JsonValue = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Conversions
// =============================================================================

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Network("request timed out".to_string())
        } else if err.is_connect() {
            AppError::Network("connection failed".to_string())
        } else if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if err.is_builder() {
            AppError::Internal(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn file(msg: impl Into<String>) -> Self {
        AppError::File(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_maps_to_unauthorized() {
        let err = AppError::from_response(401, br#"{"message":"Token expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_message_taken_from_body() {
        let err = AppError::from_response(400, br#"{"message":"Username already taken"}"#);
        assert_eq!(err.user_message_or("Failed to sign up"), "Username already taken");
        assert_eq!(err.code(), "API_ERROR");
    }

    #[test]
    fn test_error_field_ignored_when_message_blank() {
        let body = br#"{"status":500,"error":"Internal Server Error","message":""}"#;
        assert_eq!(extract_message(body), None);
    }

    #[test]
    fn test_reason_phrase_falls_back() {
        let body = br#"{"status":400,"error":"Bad Request","path":"/api/v1/user/me/update"}"#;
        let err = AppError::from_response(400, body);
        assert_eq!(err.user_message_or("Failed to update profile"), "Failed to update profile");
    }

    #[test]
    fn test_network_error_uses_fallback() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.user_message_or("Failed to load users"), "Failed to load users");
    }

    #[test]
    fn test_fallback_without_body() {
        let err = AppError::from_response(502, b"<html>Bad gateway</html>");
        assert_eq!(err.user_message_or("Failed to update profile"), "Failed to update profile");
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_not_found_keeps_message() {
        let err = AppError::from_response(404, br#"{"message":"No budget b9"}"#);
        assert!(matches!(err, AppError::NotFound(Some(_))));
        assert_eq!(err.server_message(), Some("No budget b9"));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Email is required");
        errors.add("email", "Please enter a valid email");
        errors.add("firstName", "First name is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Email is required"));

        let err = AppError::from(errors);
        assert_eq!(err.user_message(), "Email is required; First name is required");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::internal("mutex poisoned");
        assert_eq!(err.user_message_or("Failed"), "Failed");
    }

    #[test]
    fn test_file_error_shown_as_is() {
        let err = AppError::file("Failed to write report-r1.pdf: permission denied");
        assert_eq!(err.code(), "FILE_ERROR");
        assert_eq!(
            err.user_message_or("Report request failed"),
            "Failed to write report-r1.pdf: permission denied"
        );
    }
}
