//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod credit;
pub mod debt;
pub mod expense;
pub mod pay;

pub use budget::{handle_budget_command, BudgetCommands};
pub use credit::{handle_credit_command, CreditCommands};
pub use debt::{handle_debt_command, DebtCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use pay::{handle_pay_command, PayCommands};

use chrono::{Local, NaiveDate};

use crate::config::Settings;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{Money, UserId};

/// Parse a money argument, naming the field in the error
pub(crate) fn parse_money(input: &str, field: &str) -> DrainerResult<Money> {
    Money::parse(input).map_err(|e| {
        DrainerError::Validation(format!(
            "Invalid {} '{}'. Use a format like '120.50' or '120'. Error: {}",
            field, input, e
        ))
    })
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> DrainerResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            DrainerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(today()),
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The user commands run as: `--as` when given, otherwise the configured user
pub fn resolve_viewer(settings: &Settings, as_user: Option<&str>) -> UserId {
    match as_user.map(str::trim).filter(|s| !s.is_empty()) {
        Some(user) => UserId::from(user),
        None => settings.current_user_id.clone(),
    }
}

/// Display name for `user`: the configured name for the current user, the id otherwise
pub(crate) fn display_name(settings: &Settings, user: &UserId) -> String {
    if user == &settings.current_user_id {
        settings.current_user_name.clone()
    } else {
        user.to_string()
    }
}
