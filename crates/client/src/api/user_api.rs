//! Authentication, profile and user administration endpoints.

use std::sync::Arc;

use common::AppResult;
use domain::{AuthResponse, Credentials, PasswordUpdate, SignupData, User, UserUpdate};

use crate::transport::{segment, ApiClient};

/// Facade over `/auth`, `/user` and `/admin/users`.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: Arc<ApiClient>,
}

impl UserApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    // === Authentication ===

    /// Register a new user.
    pub async fn signup(&self, data: &SignupData) -> AppResult<User> {
        self.client.post(self.client.url("/auth/signup")?, data).await
    }

    /// Exchange credentials for a token. The response is returned as sent;
    /// persisting it is the caller's job.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<AuthResponse> {
        self.client.post(self.client.url("/auth/login")?, credentials).await
    }

    // === Current user ===

    pub async fn get_current_user(&self) -> AppResult<User> {
        self.client.get(self.client.url("/user/me")?).await
    }

    pub async fn update_password(&self, update: &PasswordUpdate) -> AppResult<User> {
        self.client.put(self.client.url("/user/me/password")?, update).await
    }

    pub async fn update_user_details(&self, update: &UserUpdate) -> AppResult<User> {
        self.client.put(self.client.url("/user/me/update")?, update).await
    }

    // === Administration ===

    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        self.client.get(self.client.url("/admin/users")?).await
    }

    pub async fn get_user_by_id(&self, id: &str) -> AppResult<User> {
        let url = self.client.url(&format!("/admin/users/{}", segment(id)))?;
        self.client.get(url).await
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> AppResult<User> {
        let url = self.client.url(&format!("/admin/users/{}", segment(id)))?;
        self.client.put(url, update).await
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("/admin/users/{}", segment(id)))?;
        self.client.delete(url).await
    }
}
