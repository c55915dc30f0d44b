//! Typed endpoint facades.
//!
//! Every method maps one operation to exactly one request on the shared
//! [`ApiClient`](crate::transport::ApiClient) and returns the decoded
//! response unchanged.

mod account_api;
mod budget_api;
mod report_api;
mod transaction_api;
mod user_api;

pub use account_api::AccountApi;
pub use budget_api::BudgetApi;
pub use report_api::ReportApi;
pub use transaction_api::TransactionApi;
pub use user_api::UserApi;
