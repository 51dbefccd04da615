//! Core data models for Debt Drainer
//!
//! Shared expenses and their participant shares, debts with optional daily
//! micropayments, monthly budget categories and the credit score snapshot.

pub mod budget;
pub mod credit;
pub mod debt;
pub mod expense;
pub mod ids;
pub mod micropayment;
pub mod money;

pub use budget::BudgetCategory;
pub use credit::{CreditAction, CreditFactors, CreditScore, ScoreBand};
pub use debt::{Debt, DebtCategory};
pub use expense::{Expense, ExpenseCategory, Participant};
pub use ids::{BudgetCategoryId, DebtId, ExpenseId, MicroPaymentId, ParticipantId, UserId};
pub use micropayment::{MicroPayment, PaymentFrequency, PaymentStatus};
pub use money::Money;
