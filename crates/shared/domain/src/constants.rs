//! Domain-level constants.
//!
//! These constants define wire values and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Role assigned to regular users
pub const ROLE_NORMAL_USER: &str = "ROLE_NORMAL_USER";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_NORMAL_USER, ROLE_ADMIN];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length accepted by the password and signup forms
pub const MIN_PASSWORD_LENGTH: u64 = 6;

// =============================================================================
// Authentication
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Storage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Storage key holding the JSON snapshot of the signed-in user
pub const USER_STORAGE_KEY: &str = "user";

/// Path the client is sent to after an authentication failure
pub const DEFAULT_LOGIN_PATH: &str = "/login";

// =============================================================================
// API
// =============================================================================

/// Prefix shared by every REST endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Default service address (user-service port)
pub const DEFAULT_API_URL: &str = "http://localhost:8081";
