//! Session expiry handling.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{error, warn};

use common::AppResult;

use super::Middleware;
use crate::session::Session;

/// Sends the user to the login screen.
pub trait LoginRedirect: Send + Sync {
    fn redirect(&self, login_path: &str);
}

/// Redirect that only logs; for embedders without a login screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect(&self, login_path: &str) {
        warn!("Authentication required, continue at {}", login_path);
    }
}

/// Clears the session and redirects to login on any 401 response.
pub struct UnauthorizedRedirect {
    session: Session,
    redirect: Arc<dyn LoginRedirect>,
    login_path: String,
}

impl UnauthorizedRedirect {
    pub fn new(
        session: Session,
        redirect: Arc<dyn LoginRedirect>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            redirect,
            login_path: login_path.into(),
        }
    }
}

impl Middleware for UnauthorizedRedirect {
    fn after(&self, status: StatusCode) -> AppResult<()> {
        if status != StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        warn!("Received 401, clearing stored session");
        // The call still ends as Unauthorized when clearing fails
        if let Err(e) = self.session.clear() {
            error!(code = e.code(), "Failed to clear session after 401: {}", e);
        }
        self.redirect.redirect(&self.login_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use common::AppError;
    use domain::{AuthResponse, User, UserRole};

    use crate::session::MockSessionStore;

    #[derive(Default)]
    struct RecordingRedirect {
        paths: Mutex<Vec<String>>,
    }

    impl LoginRedirect for RecordingRedirect {
        fn redirect(&self, login_path: &str) {
            self.paths.lock().unwrap().push(login_path.to_string());
        }
    }

    fn signed_in() -> Session {
        let session = Session::in_memory();
        session
            .establish(&AuthResponse {
                token: "tok".to_string(),
                user: User {
                    id: "u1".to_string(),
                    email: "u@example.com".to_string(),
                    username: "u".to_string(),
                    first_name: String::new(),
                    last_name: String::new(),
                    phone_number: String::new(),
                    role: UserRole::Admin,
                },
            })
            .unwrap();
        session
    }

    #[test]
    fn test_401_clears_session_and_redirects() {
        let session = signed_in();
        let redirect = Arc::new(RecordingRedirect::default());
        let hook = UnauthorizedRedirect::new(session.clone(), redirect.clone(), "/login");

        hook.after(StatusCode::UNAUTHORIZED).unwrap();

        assert_eq!(session.token().unwrap(), None);
        assert_eq!(session.user().unwrap(), None);
        assert_eq!(*redirect.paths.lock().unwrap(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_other_statuses_pass_through() {
        let session = signed_in();
        let redirect = Arc::new(RecordingRedirect::default());
        let hook = UnauthorizedRedirect::new(session.clone(), redirect.clone(), "/login");

        for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
            hook.after(status).unwrap();
        }

        assert!(session.is_authenticated().unwrap());
        assert!(redirect.paths.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clear_failure_still_redirects() {
        let mut store = MockSessionStore::new();
        store
            .expect_remove()
            .returning(|_| Err(AppError::storage("disk full")));
        let session = Session::new(Arc::new(store));
        let redirect = Arc::new(RecordingRedirect::default());
        let hook = UnauthorizedRedirect::new(session, redirect.clone(), "/login");

        assert!(hook.after(StatusCode::UNAUTHORIZED).is_ok());
        assert_eq!(*redirect.paths.lock().unwrap(), vec!["/login".to_string()]);
    }
}
