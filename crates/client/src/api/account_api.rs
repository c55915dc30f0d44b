//! Bank account linking endpoints.

use std::sync::Arc;

use common::AppResult;
use domain::{AccountUpdate, BankAccount, LinkAccount};

use crate::transport::{segment, ApiClient};

/// Facade over `/accounts`.
#[derive(Debug, Clone)]
pub struct AccountApi {
    client: Arc<ApiClient>,
}

impl AccountApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_all_accounts(&self) -> AppResult<Vec<BankAccount>> {
        self.client.get(self.client.url("/accounts")?).await
    }

    pub async fn get_account_by_id(&self, id: &str) -> AppResult<BankAccount> {
        let url = self.client.url(&format!("/accounts/{}", segment(id)))?;
        self.client.get(url).await
    }

    /// Create an account record directly.
    pub async fn create_account(&self, account: &LinkAccount) -> AppResult<BankAccount> {
        self.client.post(self.client.url("/accounts")?, account).await
    }

    /// Link an account held at a bank.
    pub async fn link_account(&self, account: &LinkAccount) -> AppResult<BankAccount> {
        self.client.post(self.client.url("/accounts/link")?, account).await
    }

    pub async fn update_account(&self, id: &str, update: &AccountUpdate) -> AppResult<BankAccount> {
        let url = self.client.url(&format!("/accounts/{}", segment(id)))?;
        self.client.put(url, update).await
    }

    pub async fn delete_account(&self, id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("/accounts/{}", segment(id)))?;
        self.client.delete(url).await
    }

    /// Refresh balance and status from the bank.
    pub async fn sync_account(&self, id: &str) -> AppResult<BankAccount> {
        let url = self.client.url(&format!("/accounts/{}/sync", segment(id)))?;
        self.client.post_empty(url).await
    }
}
