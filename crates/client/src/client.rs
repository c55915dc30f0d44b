//! Entry point tying the session, transport and facades together.

use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::{AuthResponse, User};

use crate::api::{AccountApi, BudgetApi, ReportApi, TransactionApi, UserApi};
use crate::config::ClientConfig;
use crate::forms::{LoginForm, PasswordChangeForm, ProfileForm, SignupForm};
use crate::middleware::LoginRedirect;
use crate::session::{FileSessionStore, Session};
use crate::transport::ApiClient;

/// Finance service client with a persistent session.
///
/// The facades are plain request wrappers. The flows on this type also
/// validate forms first and keep the session in step with the server.
#[derive(Debug, Clone)]
pub struct FinanceClient {
    session: Session,
    users: UserApi,
    transactions: TransactionApi,
    budgets: BudgetApi,
    reports: ReportApi,
    accounts: AccountApi,
}

impl FinanceClient {
    /// Build facades over an already configured transport.
    pub fn new(api: Arc<ApiClient>, session: Session) -> Self {
        Self {
            session,
            users: UserApi::new(api.clone()),
            transactions: TransactionApi::new(api.clone()),
            budgets: BudgetApi::new(api.clone()),
            reports: ReportApi::new(api.clone()),
            accounts: AccountApi::new(api),
        }
    }

    /// Client backed by the session file and reqwest transport from `config`.
    pub fn from_config(config: &ClientConfig, redirect: Arc<dyn LoginRedirect>) -> AppResult<Self> {
        let store = FileSessionStore::new(config.session_file());
        let session = Session::new(Arc::new(store));
        let api = ApiClient::from_config(config, session.clone(), redirect)?;

        Ok(Self::new(Arc::new(api), session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn users(&self) -> &UserApi {
        &self.users
    }

    pub fn transactions(&self) -> &TransactionApi {
        &self.transactions
    }

    pub fn budgets(&self) -> &BudgetApi {
        &self.budgets
    }

    pub fn reports(&self) -> &ReportApi {
        &self.reports
    }

    pub fn accounts(&self) -> &AccountApi {
        &self.accounts
    }

    // === Flows ===

    /// Register a new account. Does not sign in.
    pub async fn signup(&self, form: SignupForm) -> AppResult<User> {
        let data = form.into_signup()?;
        let user = self.users.signup(&data).await?;
        info!(username = %user.username, "Signed up");
        Ok(user)
    }

    /// Sign in and persist the token and user snapshot.
    pub async fn login(&self, form: LoginForm) -> AppResult<AuthResponse> {
        let credentials = form.into_credentials()?;
        let auth = self.users.login(&credentials).await?;
        self.session.establish(&auth)?;
        Ok(auth)
    }

    /// Forget the stored credentials. No request is made.
    pub fn logout(&self) -> AppResult<()> {
        self.session.clear()
    }

    /// Fetch the signed-in user and refresh the stored snapshot.
    pub async fn refresh_user(&self) -> AppResult<User> {
        let user = self.users.get_current_user().await?;
        self.session.update_user(&user)?;
        Ok(user)
    }

    /// Save profile changes; the stored snapshot follows the server's answer.
    pub async fn update_profile(&self, form: ProfileForm) -> AppResult<User> {
        let update = form.into_update()?;
        let user = self.users.update_user_details(&update).await?;
        self.session.update_user(&user)?;
        Ok(user)
    }

    pub async fn change_password(&self, form: PasswordChangeForm) -> AppResult<User> {
        let update = form.into_update()?;
        self.users.update_password(&update).await
    }
}
