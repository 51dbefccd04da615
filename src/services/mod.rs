//! Service layer for Debt Drainer
//!
//! Pure calculators (split, classify, due dates, credit simulation) and the
//! storage-backed services that validate, persist and audit changes.

pub mod budget;
pub mod classify;
pub mod credit;
pub mod debt;
pub mod due_date;
pub mod expense;
pub mod micropayment;
pub mod settlement;
pub mod split;

pub use budget::BudgetService;
pub use classify::{
    apply_view, classify, Bucket, ExpenseTab, ExpenseView, ExpenseViewState, SortOrder,
};
pub use credit::{CreditSimulator, Simulation};
pub use debt::{DebtService, NewDebt};
pub use due_date::{due_date_in_month, due_schedule, next_due_date, DueItem, DueStatus};
pub use expense::{ExpenseService, NewExpense};
pub use micropayment::{LocalScheduler, MicroPaymentService, PaymentRequest, PaymentScheduler};
pub use settlement::{SettlementOutcome, SettlementService};
pub use split::{allocate, split_equally, SplitMember};
