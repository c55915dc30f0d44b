//! Client configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use domain::{DEFAULT_API_URL, DEFAULT_LOGIN_PATH};

/// File holding the persisted session inside the session directory
pub const SESSION_FILE_NAME: &str = "session.json";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the finance service
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Directory holding the persisted session
    pub session_dir: PathBuf,
    /// Path handed to the login redirect after a 401
    pub login_path: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("FINANCE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_seconds: env::var("FINANCE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            session_dir: env::var("FINANCE_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_dir()),
            login_path: env::var("FINANCE_LOGIN_PATH")
                .unwrap_or_else(|_| DEFAULT_LOGIN_PATH.to_string()),
        }
    }

    /// Override the service address.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Full path of the session file.
    pub fn session_file(&self) -> PathBuf {
        self.session_dir.join(SESSION_FILE_NAME)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
            session_dir: default_session_dir(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

/// Platform data directory, or a dot-directory in the working directory
/// when the platform has none.
fn default_session_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("finance-tracker"))
        .unwrap_or_else(|| PathBuf::from(".finance-tracker"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.api_url, "http://localhost:8081");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.session_file().ends_with("session.json"));
    }

    #[test]
    fn test_with_api_url() {
        let config = ClientConfig::default().with_api_url("https://finance.example.com");
        assert_eq!(config.api_url, "https://finance.example.com");
    }
}
