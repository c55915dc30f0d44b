//! Command-line arguments.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use domain::{AccountType, BudgetPeriod, ExportFormat, ReportType, TransactionType, UserRole};

#[derive(Parser, Debug)]
#[command(name = "finance")]
#[command(about = "Command-line client for the Finance Tracker service")]
pub struct Cli {
    /// Base URL of the finance service
    #[arg(long, global = true, env = "FINANCE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "FINANCE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone_number: String,
    },
    /// Sign in and store the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "FINANCE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Fetch the user from the server instead of the stored snapshot
        #[arg(long)]
        refresh: bool,
    },
    /// Manage the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Change the signed-in user's password
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Income and expense records
    Transactions {
        #[command(subcommand)]
        action: TransactionAction,
    },
    /// Spending limits
    Budgets {
        #[command(subcommand)]
        action: BudgetAction,
    },
    /// Generated reports
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Linked bank accounts
    Accounts {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Update profile fields; omitted fields keep their current value
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PasswordAction {
    Change {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    Users {
        #[command(subcommand)]
        action: AdminUserAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminUserAction {
    List,
    Get { id: String },
    Update {
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
pub struct UserFields {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
    /// "admin" or "user"
    #[arg(long)]
    pub role: Option<UserRole>,
}

#[derive(Subcommand, Debug)]
pub enum TransactionAction {
    List,
    Get { id: String },
    Create {
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        /// INCOME or EXPENSE
        #[arg(long = "type")]
        transaction_type: TransactionType,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        account_id: Option<String>,
    },
    Update {
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<Decimal>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        account_id: Option<String>,
    },
    Delete { id: String },
    /// Transactions in one category
    Category { category: String },
    /// Transactions between two dates
    Range {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
}

#[derive(Subcommand, Debug)]
pub enum BudgetAction {
    List,
    Get { id: String },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        category: String,
        /// WEEKLY, MONTHLY or YEARLY
        #[arg(long)]
        period: BudgetPeriod,
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        period: Option<BudgetPeriod>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    Delete { id: String },
    /// Budgets in one category
    Category { category: String },
}

#[derive(Subcommand, Debug)]
pub enum ReportAction {
    Generate {
        /// e.g. EXPENSE_SUMMARY or expense-summary
        #[arg(long = "type")]
        report_type: ReportType,
        /// Extra parameters as a JSON object
        #[arg(long)]
        params: Option<JsonValue>,
    },
    List,
    Get { id: String },
    Delete { id: String },
    /// Download a report file
    Export {
        id: String,
        #[arg(long, default_value = "pdf")]
        format: ExportFormat,
        /// Output file, defaults to report-<id>.<ext>
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountAction {
    List,
    Get { id: String },
    /// Create an account record
    Create {
        #[command(flatten)]
        account: AccountFields,
    },
    /// Link an account held at a bank
    Link {
        #[command(flatten)]
        account: AccountFields,
    },
    Update {
        id: String,
        #[arg(long)]
        bank_name: Option<String>,
        #[arg(long = "type")]
        account_type: Option<AccountType>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: String },
    /// Refresh balance and status from the bank
    Sync { id: String },
}

#[derive(Args, Debug)]
pub struct AccountFields {
    #[arg(long)]
    pub account_number: String,
    #[arg(long)]
    pub bank_name: String,
    /// CHECKING, SAVINGS, CREDIT_CARD or INVESTMENT
    #[arg(long = "type")]
    pub account_type: AccountType,
    #[arg(long)]
    pub balance: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_date_range() {
        let cli = Cli::try_parse_from([
            "finance",
            "transactions",
            "range",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ])
        .unwrap();

        match cli.command {
            Command::Transactions {
                action: TransactionAction::Range { start, end },
            } => {
                assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
                assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_typed_values() {
        let cli = Cli::try_parse_from([
            "finance",
            "--api-url",
            "http://example.test",
            "reports",
            "export",
            "r-1",
            "--format",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://example.test"));
        match cli.command {
            Command::Reports {
                action: ReportAction::Export { id, format, output },
            } => {
                assert_eq!(id, "r-1");
                assert_eq!(format, ExportFormat::Csv);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_transaction_type() {
        let result = Cli::try_parse_from([
            "finance",
            "transactions",
            "create",
            "--amount",
            "10",
            "--description",
            "Lunch",
            "--category",
            "Food",
            "--type",
            "TRANSFER",
            "--date",
            "2024-01-01",
        ]);

        assert!(result.is_err());
    }
}
