//! Reports module for Debt Drainer
//!
//! Recomputed-on-read aggregations for the dashboard: shared expense
//! totals, budget totals and the debt summary.

pub mod budget_totals;
pub mod dashboard;
pub mod debt_summary;

pub use budget_totals::{BudgetTotals, CategoryUsage};
pub use dashboard::DashboardTotals;
pub use debt_summary::DebtSummary;
