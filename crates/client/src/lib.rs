//! Finance Tracker client library
//!
//! Typed access to the finance service REST API:
//! - `transport`: one shared HTTP client with a middleware pipeline
//! - `middleware`: bearer injection and session expiry handling
//! - `session`: persisted token and user snapshot
//! - `api`: one facade per resource (users, transactions, budgets, reports, accounts)
//! - `forms`: client-side validation producing request bodies
//!
//! [`FinanceClient`] wires these together for applications.

pub mod api;
pub mod client;
pub mod config;
pub mod forms;
pub mod middleware;
pub mod session;
pub mod transport;

pub use client::FinanceClient;
pub use config::ClientConfig;
pub use session::Session;
pub use transport::{ApiClient, HttpSend, RawResponse, ReqwestSender};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockHttpSend;
