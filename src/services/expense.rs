//! Expense service
//!
//! Creating shared expenses (split or with explicit shares), listing them
//! through a view state, lookup and deletion.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{Expense, ExpenseCategory, ExpenseId, Money, Participant, UserId};
use crate::services::classify::{apply_view, ExpenseView, ExpenseViewState};
use crate::services::split::{split_equally, SplitMember};
use crate::storage::Storage;

/// Input for a new equally-split expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub payer: SplitMember,
    /// Everyone sharing the cost besides the payer
    pub others: Vec<SplitMember>,
    pub notes: Option<String>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an expense split equally between the payer and the others
    pub fn create(&self, new: NewExpense) -> DrainerResult<Expense> {
        let participants = split_equally(new.amount, &new.payer, &new.others)?;
        let mut expense = Expense::new(
            new.title.trim(),
            new.amount,
            new.date,
            new.category,
            new.payer.user_id.clone(),
            participants,
        );
        expense.notes = new.notes.filter(|n| !n.trim().is_empty());

        self.insert(expense)
    }

    /// Create an expense with shares already decided by the caller
    pub fn create_with_shares(
        &self,
        title: &str,
        amount: Money,
        date: NaiveDate,
        category: ExpenseCategory,
        payer_id: UserId,
        participants: Vec<Participant>,
    ) -> DrainerResult<Expense> {
        let expense = Expense::new(title.trim(), amount, date, category, payer_id, participants);
        self.insert(expense)
    }

    fn insert(&self, expense: Expense) -> DrainerResult<Expense> {
        expense
            .validate()
            .map_err(|e| DrainerError::Validation(e.to_string()))?;

        self.storage.expenses.commit(expense.clone())?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> DrainerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by short display id (`exp-1a2b3c4d`) or full UUID
    pub fn find(&self, identifier: &str) -> DrainerResult<Option<Expense>> {
        if let Ok(id) = identifier.trim().parse::<ExpenseId>() {
            if let Some(expense) = self.storage.expenses.get(id)? {
                return Ok(Some(expense));
            }
        }

        let matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches(identifier))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.into_iter().next()),
            _ => Err(DrainerError::Validation(format!(
                "'{}' matches more than one expense; use the full id",
                identifier
            ))),
        }
    }

    /// Like `find`, but a missing expense is an error
    pub fn require(&self, identifier: &str) -> DrainerResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| DrainerError::expense_not_found(identifier))
    }

    /// Expenses the viewer is involved in, filtered and sorted by `state`
    pub fn list(
        &self,
        viewer: &UserId,
        state: &ExpenseViewState,
    ) -> DrainerResult<Vec<ExpenseView>> {
        let expenses = self.storage.expenses.get_for_user(viewer)?;
        Ok(apply_view(&expenses, viewer, state))
    }

    /// Delete an expense and its participants
    pub fn delete(&self, id: ExpenseId) -> DrainerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .remove(id)?
            .ok_or_else(|| DrainerError::expense_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &expense,
        )?;

        Ok(expense)
    }
}
