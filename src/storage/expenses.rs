//! Expense repository for JSON storage
//!
//! Expenses are stored with their participants embedded, so an expense and
//! all of its shares are always written together in one atomic file write.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DrainerError;
use crate::models::{Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, persist_or_reload};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a per-user index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: user_id (payer or participant) -> expense ids
    by_user: RwLock<HashMap<UserId, Vec<ExpenseId>>>,
}

fn involved_users(expense: &Expense) -> Vec<UserId> {
    let mut users = vec![expense.payer_id.clone()];
    for p in &expense.participants {
        if !users.contains(&p.user_id) {
            users.push(p.user_id.clone());
        }
    }
    users
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the index
    pub fn load(&self) -> Result<(), DrainerError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_user = self.by_user.write().map_err(lock_error)?;

        data.clear();
        by_user.clear();

        for expense in file_data.expenses {
            for user in involved_users(&expense) {
                by_user.entry(user).or_default().push(expense.id);
            }
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), DrainerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Upsert and persist as one unit
    ///
    /// If the write fails, in-memory state is reloaded from disk so nothing
    /// unsaved is left visible, and the write error is returned.
    pub fn commit(&self, expense: Expense) -> Result<(), DrainerError> {
        self.upsert(expense)?;
        persist_or_reload("expenses", || self.save(), || self.load())
    }

    /// Delete and persist as one unit
    pub fn remove(&self, id: ExpenseId) -> Result<Option<Expense>, DrainerError> {
        let removed = self.delete(id)?;
        if removed.is_some() {
            persist_or_reload("expenses", || self.save(), || self.load())?;
        }
        Ok(removed)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    /// Expenses the user paid for or has a share in, newest first
    pub fn get_for_user(&self, user: &UserId) -> Result<Vec<Expense>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_user = self.by_user.read().map_err(lock_error)?;

        let ids = by_user.get(user).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    pub fn upsert(&self, expense: Expense) -> Result<(), DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_user = self.by_user.write().map_err(lock_error)?;

        if let Some(old) = data.get(&expense.id) {
            for user in involved_users(old) {
                if let Some(ids) = by_user.get_mut(&user) {
                    ids.retain(|&id| id != expense.id);
                }
            }
        }

        for user in involved_users(&expense) {
            by_user.entry(user).or_default().push(expense.id);
        }

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense together with its participants
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_user = self.by_user.write().map_err(lock_error)?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            for user in involved_users(expense) {
                if let Some(ids) = by_user.get_mut(&user) {
                    ids.retain(|&eid| eid != id);
                }
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
