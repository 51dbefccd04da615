//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for expenses, debts, payments and the
//! credit score.

pub mod debt;
pub mod expense;
pub mod payment;

pub use debt::{format_debt_details, format_debt_list, format_due_schedule};
pub use expense::{format_expense_details, format_expense_list, format_settlement};
pub use payment::{format_credit_score, format_payment_history, format_simulation};
