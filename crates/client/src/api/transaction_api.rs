//! Transaction endpoints.

use std::sync::Arc;

use chrono::NaiveDate;

use common::AppResult;
use domain::{NewTransaction, Transaction, TransactionUpdate};

use crate::transport::{segment, ApiClient};

/// Date format of the `startDate` / `endDate` query parameters
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Facade over `/transactions`.
#[derive(Debug, Clone)]
pub struct TransactionApi {
    client: Arc<ApiClient>,
}

impl TransactionApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_all_transactions(&self) -> AppResult<Vec<Transaction>> {
        self.client.get(self.client.url("/transactions")?).await
    }

    pub async fn get_transaction_by_id(&self, id: &str) -> AppResult<Transaction> {
        let url = self.client.url(&format!("/transactions/{}", segment(id)))?;
        self.client.get(url).await
    }

    pub async fn create_transaction(&self, transaction: &NewTransaction) -> AppResult<Transaction> {
        self.client.post(self.client.url("/transactions")?, transaction).await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        update: &TransactionUpdate,
    ) -> AppResult<Transaction> {
        let url = self.client.url(&format!("/transactions/{}", segment(id)))?;
        self.client.put(url, update).await
    }

    pub async fn delete_transaction(&self, id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("/transactions/{}", segment(id)))?;
        self.client.delete(url).await
    }

    pub async fn get_transactions_by_category(
        &self,
        category: &str,
    ) -> AppResult<Vec<Transaction>> {
        let url = self
            .client
            .url(&format!("/transactions/category/{}", segment(category)))?;
        self.client.get(url).await
    }

    /// Transactions between two dates; the bounds are passed to the service
    /// as given.
    pub async fn get_transactions_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<Transaction>> {
        let start = start_date.format(QUERY_DATE_FORMAT).to_string();
        let end = end_date.format(QUERY_DATE_FORMAT).to_string();
        let url = self.client.url_with_query(
            "/transactions/date-range",
            &[("startDate", start.as_str()), ("endDate", end.as_str())],
        )?;
        self.client.get(url).await
    }
}
