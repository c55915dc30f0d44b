//! Session context owning the persisted credential pair.
//!
//! The bearer token and a snapshot of the signed-in user live in a
//! [`SessionStore`] under two keys. [`Session`] is the only component that
//! reads or writes them: login establishes the pair, logout and the 401
//! hook clear it.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockSessionStore;

use std::sync::Arc;

use tracing::{info, warn};

use common::AppResult;
use domain::{AuthResponse, User, TOKEN_STORAGE_KEY, USER_STORAGE_KEY};

/// Owned session context shared by the middleware and the application.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Stored bearer token, if any
    pub fn token(&self) -> AppResult<Option<String>> {
        self.store.get(TOKEN_STORAGE_KEY)
    }

    /// Stored user snapshot, if any.
    ///
    /// An unreadable snapshot is reported as absent.
    pub fn user(&self) -> AppResult<Option<User>> {
        let Some(raw) = self.store.get(USER_STORAGE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Discarding unreadable user snapshot: {}", e);
                Ok(None)
            }
        }
    }

    /// Check whether a token is present
    pub fn is_authenticated(&self) -> AppResult<bool> {
        Ok(self.token()?.is_some())
    }

    /// Persist the token and user from a successful login.
    pub fn establish(&self, auth: &AuthResponse) -> AppResult<()> {
        self.store.set(TOKEN_STORAGE_KEY, &auth.token)?;
        self.update_user(&auth.user)?;
        info!("Signed in as {}", auth.user.username);
        Ok(())
    }

    /// Replace the user snapshot, keeping the token.
    pub fn update_user(&self, user: &User) -> AppResult<()> {
        let snapshot = serde_json::to_string(user)?;
        self.store.set(USER_STORAGE_KEY, &snapshot)
    }

    /// Remove both entries.
    pub fn clear(&self) -> AppResult<()> {
        // Drop the token first so a failure never leaves it behind alone
        self.store.remove(TOKEN_STORAGE_KEY)?;
        self.store.remove(USER_STORAGE_KEY)?;
        info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("store", &"[..]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::UserRole;
    use mockall::predicate::eq;

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            email: "jane@example.com".to_string(),
            username: "jane".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "555-0100".to_string(),
            role: UserRole::NormalUser,
        }
    }

    fn sample_auth() -> AuthResponse {
        AuthResponse {
            token: "tok-123".to_string(),
            user: sample_user(),
        }
    }

    #[test]
    fn test_establish_and_clear() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated().unwrap());

        session.establish(&sample_auth()).unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(session.user().unwrap(), Some(sample_user()));

        session.clear().unwrap();
        assert_eq!(session.token().unwrap(), None);
        assert_eq!(session.user().unwrap(), None);
    }

    #[test]
    fn test_update_user_keeps_token() {
        let session = Session::in_memory();
        session.establish(&sample_auth()).unwrap();

        let mut user = sample_user();
        user.first_name = "Janet".to_string();
        session.update_user(&user).unwrap();

        assert_eq!(session.token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(session.user().unwrap().unwrap().first_name, "Janet");
    }

    #[test]
    fn test_corrupt_snapshot_reads_as_absent() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(USER_STORAGE_KEY, "{broken").unwrap();

        let session = Session::new(store);
        assert_eq!(session.user().unwrap(), None);
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut store = MockSessionStore::new();
        store
            .expect_remove()
            .with(eq(TOKEN_STORAGE_KEY))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_remove()
            .with(eq(USER_STORAGE_KEY))
            .times(1)
            .returning(|_| Ok(()));

        Session::new(Arc::new(store)).clear().unwrap();
    }

    #[test]
    fn test_store_failure_propagates() {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .returning(|_| Err(common::AppError::storage("disk gone")));

        let err = Session::new(Arc::new(store)).token().unwrap_err();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }
}
