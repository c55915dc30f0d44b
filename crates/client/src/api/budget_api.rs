//! Budget endpoints.

use std::sync::Arc;

use common::AppResult;
use domain::{Budget, BudgetUpdate, NewBudget};

use crate::transport::{segment, ApiClient};

/// Facade over `/budgets`.
#[derive(Debug, Clone)]
pub struct BudgetApi {
    client: Arc<ApiClient>,
}

impl BudgetApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_all_budgets(&self) -> AppResult<Vec<Budget>> {
        self.client.get(self.client.url("/budgets")?).await
    }

    pub async fn get_budget_by_id(&self, id: &str) -> AppResult<Budget> {
        let url = self.client.url(&format!("/budgets/{}", segment(id)))?;
        self.client.get(url).await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> AppResult<Budget> {
        self.client.post(self.client.url("/budgets")?, budget).await
    }

    pub async fn update_budget(&self, id: &str, update: &BudgetUpdate) -> AppResult<Budget> {
        let url = self.client.url(&format!("/budgets/{}", segment(id)))?;
        self.client.put(url, update).await
    }

    pub async fn delete_budget(&self, id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("/budgets/{}", segment(id)))?;
        self.client.delete(url).await
    }

    pub async fn get_budgets_by_category(&self, category: &str) -> AppResult<Vec<Budget>> {
        let url = self
            .client
            .url(&format!("/budgets/category/{}", segment(category)))?;
        self.client.get(url).await
    }
}
