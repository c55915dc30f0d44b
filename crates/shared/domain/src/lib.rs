//! Domain layer - Data shapes exchanged with the finance service.
//!
//! This crate contains plain DTOs with no infrastructure dependencies.
//! Every type here mirrors the JSON the REST API sends or accepts.

pub mod account;
pub mod budget;
pub mod constants;
pub mod error;
pub mod report;
pub mod transaction;
pub mod user;

pub use account::{AccountType, AccountUpdate, BankAccount, LinkAccount};
pub use budget::{Budget, BudgetPeriod, BudgetUpdate, NewBudget};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use report::{ExportFormat, GenerateReport, Report, ReportType};
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdate};
pub use user::{AuthResponse, Credentials, PasswordUpdate, SignupData, User, UserRole, UserUpdate};
