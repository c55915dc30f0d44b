//! Command execution.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use common::{AppError, AppResult};
use domain::{
    AccountUpdate, BudgetUpdate, ExportFormat, LinkAccount, NewBudget, NewTransaction,
    TransactionUpdate, UserUpdate,
};
use finance_client::forms::{LoginForm, PasswordChangeForm, ProfileForm, SignupForm};
use finance_client::FinanceClient;

use crate::args::{
    AccountAction, AccountFields, AdminAction, AdminUserAction, BudgetAction, Command,
    PasswordAction, ProfileAction, ReportAction, TransactionAction, UserFields,
};

/// Message shown when a command fails and the server gave no reason.
pub fn fallback_message(command: &Command) -> &'static str {
    match command {
        Command::Signup { .. } => "Failed to create account",
        Command::Login { .. } => "Login failed",
        Command::Logout => "Failed to log out",
        Command::Whoami { .. } => "Failed to load user",
        Command::Profile { .. } => "Failed to update profile",
        Command::Password { .. } => "Failed to update password",
        Command::Admin { .. } => "User administration failed",
        Command::Transactions { .. } => "Transaction request failed",
        Command::Budgets { .. } => "Budget request failed",
        Command::Reports { .. } => "Report request failed",
        Command::Accounts { .. } => "Account request failed",
    }
}

pub async fn execute(client: &FinanceClient, command: Command) -> AppResult<()> {
    match command {
        Command::Signup {
            email,
            username,
            password,
            first_name,
            last_name,
            phone_number,
        } => {
            let form = SignupForm {
                email,
                username,
                password,
                first_name,
                last_name,
                phone_number,
            };
            print_json(&client.signup(form).await?)
        }
        Command::Login { username, password } => {
            let auth = client.login(LoginForm::new(username, password)).await?;
            println!("Signed in as {}", auth.user.display_name());
            Ok(())
        }
        Command::Logout => {
            client.logout()?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami { refresh } => {
            let user = if refresh {
                Some(client.refresh_user().await?)
            } else {
                client.session().user()?
            };
            match user {
                Some(user) => print_json(&user),
                None => {
                    println!("Not signed in");
                    Ok(())
                }
            }
        }
        Command::Profile { action } => profile(client, action).await,
        Command::Password {
            action:
                PasswordAction::Change {
                    current,
                    new,
                    confirm,
                },
        } => {
            client
                .change_password(PasswordChangeForm::new(current, new, confirm))
                .await?;
            println!("Password updated");
            Ok(())
        }
        Command::Admin {
            action: AdminAction::Users { action },
        } => admin_users(client, action).await,
        Command::Transactions { action } => transactions(client, action).await,
        Command::Budgets { action } => budgets(client, action).await,
        Command::Reports { action } => reports(client, action).await,
        Command::Accounts { action } => accounts(client, action).await,
    }
}

async fn profile(client: &FinanceClient, action: ProfileAction) -> AppResult<()> {
    let ProfileAction::Update {
        first_name,
        last_name,
        email,
        phone_number,
    } = action;

    // Login always stores the snapshot; without it there is nothing to edit
    let Some(current) = client.session().user()? else {
        return Err(AppError::Unauthorized);
    };

    let mut form = ProfileForm::from_user(&current);
    if let Some(first_name) = first_name {
        form.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        form.last_name = last_name;
    }
    if let Some(email) = email {
        form.email = email;
    }
    if let Some(phone_number) = phone_number {
        form.phone_number = phone_number;
    }

    print_json(&client.update_profile(form).await?)
}

async fn admin_users(client: &FinanceClient, action: AdminUserAction) -> AppResult<()> {
    let users = client.users();
    match action {
        AdminUserAction::List => print_json(&users.get_all_users().await?),
        AdminUserAction::Get { id } => print_json(&users.get_user_by_id(&id).await?),
        AdminUserAction::Update { id, fields } => {
            let update = user_update(fields);
            if update.is_empty() {
                return Err(AppError::Validation(nothing_to_update()));
            }
            print_json(&users.update_user(&id, &update).await?)
        }
        AdminUserAction::Delete { id } => {
            users.delete_user(&id).await?;
            println!("Deleted user {}", id);
            Ok(())
        }
    }
}

fn user_update(fields: UserFields) -> UserUpdate {
    UserUpdate {
        email: fields.email,
        username: fields.username,
        first_name: fields.first_name,
        last_name: fields.last_name,
        phone_number: fields.phone_number,
        role: fields.role,
    }
}

async fn transactions(client: &FinanceClient, action: TransactionAction) -> AppResult<()> {
    let api = client.transactions();
    match action {
        TransactionAction::List => print_json(&api.get_all_transactions().await?),
        TransactionAction::Get { id } => print_json(&api.get_transaction_by_id(&id).await?),
        TransactionAction::Create {
            amount,
            description,
            category,
            transaction_type,
            date,
            account_id,
        } => {
            let transaction = NewTransaction {
                amount,
                description,
                category,
                transaction_type,
                date,
                account_id,
            };
            print_json(&api.create_transaction(&transaction).await?)
        }
        TransactionAction::Update {
            id,
            amount,
            description,
            category,
            transaction_type,
            date,
            account_id,
        } => {
            let update = TransactionUpdate {
                amount,
                description,
                category,
                transaction_type,
                date,
                account_id,
            };
            print_json(&api.update_transaction(&id, &update).await?)
        }
        TransactionAction::Delete { id } => {
            api.delete_transaction(&id).await?;
            println!("Deleted transaction {}", id);
            Ok(())
        }
        TransactionAction::Category { category } => {
            print_json(&api.get_transactions_by_category(&category).await?)
        }
        TransactionAction::Range { start, end } => {
            print_json(&api.get_transactions_by_date_range(start, end).await?)
        }
    }
}

async fn budgets(client: &FinanceClient, action: BudgetAction) -> AppResult<()> {
    let api = client.budgets();
    match action {
        BudgetAction::List => print_json(&api.get_all_budgets().await?),
        BudgetAction::Get { id } => print_json(&api.get_budget_by_id(&id).await?),
        BudgetAction::Create {
            name,
            amount,
            category,
            period,
            start_date,
            end_date,
        } => {
            let budget = NewBudget {
                name,
                amount,
                category,
                period,
                start_date,
                end_date,
            };
            print_json(&api.create_budget(&budget).await?)
        }
        BudgetAction::Update {
            id,
            name,
            amount,
            category,
            period,
            start_date,
            end_date,
        } => {
            let update = BudgetUpdate {
                name,
                amount,
                category,
                period,
                start_date,
                end_date,
            };
            print_json(&api.update_budget(&id, &update).await?)
        }
        BudgetAction::Delete { id } => {
            api.delete_budget(&id).await?;
            println!("Deleted budget {}", id);
            Ok(())
        }
        BudgetAction::Category { category } => {
            print_json(&api.get_budgets_by_category(&category).await?)
        }
    }
}

async fn reports(client: &FinanceClient, action: ReportAction) -> AppResult<()> {
    let api = client.reports();
    match action {
        ReportAction::Generate {
            report_type,
            params,
        } => print_json(&api.generate_report(report_type, params).await?),
        ReportAction::List => print_json(&api.get_all_reports().await?),
        ReportAction::Get { id } => print_json(&api.get_report_by_id(&id).await?),
        ReportAction::Delete { id } => {
            api.delete_report(&id).await?;
            println!("Deleted report {}", id);
            Ok(())
        }
        ReportAction::Export { id, format, output } => {
            let bytes = api.export_report(&id, format).await?;
            let path = output.unwrap_or_else(|| default_export_path(&id, format));
            write_export(&path, &bytes)?;
            info!(path = %path.display(), size = bytes.len(), "Report exported");
            println!("Saved {}", path.display());
            Ok(())
        }
    }
}

async fn accounts(client: &FinanceClient, action: AccountAction) -> AppResult<()> {
    let api = client.accounts();
    match action {
        AccountAction::List => print_json(&api.get_all_accounts().await?),
        AccountAction::Get { id } => print_json(&api.get_account_by_id(&id).await?),
        AccountAction::Create { account } => {
            print_json(&api.create_account(&link_account(account)).await?)
        }
        AccountAction::Link { account } => {
            print_json(&api.link_account(&link_account(account)).await?)
        }
        AccountAction::Update {
            id,
            bank_name,
            account_type,
            active,
        } => {
            let update = AccountUpdate {
                bank_name,
                account_type,
                is_active: active,
            };
            print_json(&api.update_account(&id, &update).await?)
        }
        AccountAction::Delete { id } => {
            api.delete_account(&id).await?;
            println!("Deleted account {}", id);
            Ok(())
        }
        AccountAction::Sync { id } => print_json(&api.sync_account(&id).await?),
    }
}

fn link_account(fields: AccountFields) -> LinkAccount {
    LinkAccount {
        account_number: fields.account_number,
        bank_name: fields.bank_name,
        account_type: fields.account_type,
        balance: fields.balance,
    }
}

/// `report-<id>.<ext>` in the working directory, with the id reduced to
/// characters that are safe in a file name
fn default_export_path(id: &str, format: ExportFormat) -> PathBuf {
    let safe_id: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    PathBuf::from(format!("report-{}.{}", safe_id, format.extension()))
}

fn write_export(path: &Path, bytes: &[u8]) -> AppResult<()> {
    std::fs::write(path, bytes)
        .map_err(|e| AppError::file(format!("Failed to write {}: {}", path.display(), e)))
}

fn nothing_to_update() -> common::FieldErrors {
    let mut errors = common::FieldErrors::new();
    errors.add("update", "Nothing to update");
    errors
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use domain::UserRole;
    use finance_client::{ApiClient, MockHttpSend, Session};

    use crate::redirect::TerminalRedirect;

    /// Client whose transport fails the test on any request
    fn offline_client() -> FinanceClient {
        let session = Session::in_memory();
        let api = ApiClient::new("http://localhost:8081", Arc::new(MockHttpSend::new()))
            .unwrap()
            .with_standard_middleware(session.clone(), Arc::new(TerminalRedirect), "/login");
        FinanceClient::new(Arc::new(api), session)
    }

    #[tokio::test]
    async fn test_profile_update_requires_login() {
        let client = offline_client();
        let action = ProfileAction::Update {
            first_name: Some(String::new()),
            last_name: None,
            email: None,
            phone_number: None,
        };

        let err = profile(&client, action).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_default_export_path_is_sanitized() {
        assert_eq!(
            default_export_path("r-1", ExportFormat::Pdf),
            PathBuf::from("report-r-1.pdf")
        );
        assert_eq!(
            default_export_path("../../etc/passwd", ExportFormat::Csv),
            PathBuf::from("report-______etc_passwd.csv")
        );
    }

    #[test]
    fn test_export_write_failure_is_reported() {
        let path = std::env::temp_dir()
            .join("finance-cli-missing-dir")
            .join("nested")
            .join("report.pdf");

        let err = write_export(&path, b"%PDF").unwrap_err();
        assert_eq!(err.code(), "FILE_ERROR");
        assert!(err
            .user_message_or("Report request failed")
            .starts_with("Failed to write"));
    }

    #[test]
    fn test_user_update_from_fields() {
        let update = user_update(UserFields {
            role: Some(UserRole::Admin),
            ..Default::default()
        });

        assert_eq!(update.role, Some(UserRole::Admin));
        assert!(update.email.is_none());
        assert!(!update.is_empty());
        assert!(user_update(UserFields::default()).is_empty());
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(fallback_message(&Command::Logout), "Failed to log out");
        assert_eq!(
            fallback_message(&Command::Whoami { refresh: false }),
            "Failed to load user"
        );
    }
}
