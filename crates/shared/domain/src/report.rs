//! Generated reports and the export formats they can be downloaded in.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::DomainError;

/// Kind of report the service can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    ExpenseSummary,
    IncomeSummary,
    BudgetAnalysis,
    SpendingTrends,
}

impl ReportType {
    const VALUES: &'static [&'static str] = &[
        "EXPENSE_SUMMARY",
        "INCOME_SUMMARY",
        "BUDGET_ANALYSIS",
        "SPENDING_TRENDS",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::ExpenseSummary => "EXPENSE_SUMMARY",
            ReportType::IncomeSummary => "INCOME_SUMMARY",
            ReportType::BudgetAnalysis => "BUDGET_ANALYSIS",
            ReportType::SpendingTrends => "SPENDING_TRENDS",
        }
    }
}

impl FromStr for ReportType {
    type Err = DomainError;

    /// Accepts `EXPENSE_SUMMARY` as well as `expense-summary`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "EXPENSE_SUMMARY" => Ok(ReportType::ExpenseSummary),
            "INCOME_SUMMARY" => Ok(ReportType::IncomeSummary),
            "BUDGET_ANALYSIS" => Ok(ReportType::BudgetAnalysis),
            "SPENDING_TRENDS" => Ok(ReportType::SpendingTrends),
            _ => Err(DomainError::invalid_value("report type", s, Self::VALUES)),
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated report. `data` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(default)]
    pub data: JsonValue,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub generated_at: DateTime<Utc>,
}

/// RFC 3339 timestamps, or local timestamps without offset read as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Body of the generate call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReport {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

impl GenerateReport {
    pub fn new(report_type: ReportType, params: Option<JsonValue>) -> Self {
        Self {
            report_type,
            params,
        }
    }
}

/// File format accepted by the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
    Xlsx,
}

impl ExportFormat {
    const VALUES: &'static [&'static str] = &["pdf", "csv", "xlsx"];

    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// File extension used when saving an export
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(DomainError::invalid_value("export format", s, Self::VALUES)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
