//! Dashboard totals
//!
//! What the viewer is owed and what they owe across every expense,
//! computed in a single pass.

use crate::error::DrainerResult;
use crate::models::{Expense, Money, UserId};
use crate::services::classify::{classify, viewer_amount, Bucket};
use crate::storage::Storage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardTotals {
    /// Unpaid shares of others on expenses the viewer paid
    pub owed_to_viewer: Money,
    /// The viewer's own unpaid shares on others' expenses
    pub viewer_owes: Money,
    pub owed_count: usize,
    pub owe_count: usize,
    pub settled_count: usize,
}

impl DashboardTotals {
    pub fn compute(expenses: &[Expense], viewer: &UserId) -> Self {
        let mut totals = Self::default();

        for expense in expenses {
            let bucket = classify(expense, viewer);
            match bucket {
                Bucket::OwedToViewer => {
                    totals.owed_to_viewer += viewer_amount(expense, viewer, bucket);
                    totals.owed_count += 1;
                }
                Bucket::ViewerOwes => {
                    totals.viewer_owes += viewer_amount(expense, viewer, bucket);
                    totals.owe_count += 1;
                }
                Bucket::Settled => totals.settled_count += 1,
                Bucket::NotInvolved => {}
            }
        }

        totals
    }

    pub fn generate(storage: &Storage, viewer: &UserId) -> DrainerResult<Self> {
        let expenses = storage.expenses.get_for_user(viewer)?;
        Ok(Self::compute(&expenses, viewer))
    }

    /// Owed to the viewer minus what they owe
    pub fn net(&self) -> Money {
        self.owed_to_viewer - self.viewer_owes
    }

    pub fn involved_count(&self) -> usize {
        self.owed_count + self.owe_count + self.settled_count
    }

    pub fn format_terminal(&self, viewer: &UserId) -> String {
        let mut output = String::new();

        output.push_str(&format!("Shared Expenses for {}\n", viewer));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} ({})\n",
            "Owed to you:", self.owed_to_viewer, self.owed_count
        ));
        output.push_str(&format!(
            "{:<30} {:>12} ({})\n",
            "You owe:", self.viewer_owes, self.owe_count
        ));
        output.push_str(&format!("{:<30} {:>12}\n", "Net:", self.net()));
        output.push_str(&format!("{:<30} {:>12}\n", "Settled expenses:", self.settled_count));

        output
    }
}
