//! Reporting endpoints.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use common::AppResult;
use domain::{ExportFormat, GenerateReport, Report, ReportType};

use crate::transport::{segment, ApiClient};

/// Facade over `/reports`.
#[derive(Debug, Clone)]
pub struct ReportApi {
    client: Arc<ApiClient>,
}

impl ReportApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Ask the service to build a report. `params` is forwarded untouched.
    pub async fn generate_report(
        &self,
        report_type: ReportType,
        params: Option<JsonValue>,
    ) -> AppResult<Report> {
        let body = GenerateReport::new(report_type, params);
        self.client.post(self.client.url("/reports/generate")?, &body).await
    }

    pub async fn get_report_by_id(&self, id: &str) -> AppResult<Report> {
        let url = self.client.url(&format!("/reports/{}", segment(id)))?;
        self.client.get(url).await
    }

    pub async fn get_all_reports(&self) -> AppResult<Vec<Report>> {
        self.client.get(self.client.url("/reports")?).await
    }

    pub async fn delete_report(&self, id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("/reports/{}", segment(id)))?;
        self.client.delete(url).await
    }

    /// Download a report as a file in the given format.
    pub async fn export_report(&self, id: &str, format: ExportFormat) -> AppResult<Vec<u8>> {
        let url = self.client.url_with_query(
            &format!("/reports/{}/export", segment(id)),
            &[("format", format.as_str())],
        )?;
        self.client.get_bytes(url).await
    }
}
