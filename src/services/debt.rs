//! Debt service
//!
//! CRUD for debts and their optional daily micropayment amount.

use crate::audit::EntityType;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{Debt, DebtCategory, DebtId, Money};
use crate::storage::Storage;

/// Input for a new debt
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub name: String,
    pub balance: Money,
    pub interest_rate: f64,
    pub min_payment: Money,
    pub due_day: u8,
    pub category: DebtCategory,
    pub micropayment_amount: Option<Money>,
}

pub struct DebtService<'a> {
    storage: &'a Storage,
}

impl<'a> DebtService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, new: NewDebt) -> DrainerResult<Debt> {
        let name = new.name.trim();
        if self.storage.debts.get_by_name(name)?.is_some() {
            return Err(DrainerError::Validation(format!(
                "A debt named '{}' already exists",
                name
            )));
        }

        let mut debt = Debt::new(name, new.balance, new.due_day, new.category);
        debt.interest_rate = new.interest_rate;
        debt.min_payment = new.min_payment;
        debt.micropayment_amount = new.micropayment_amount;

        debt.validate()
            .map_err(|e| DrainerError::Validation(e.to_string()))?;

        self.storage.debts.commit(debt.clone())?;

        self.storage.log_create(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.name.clone()),
            &debt,
        )?;

        Ok(debt)
    }

    pub fn get(&self, id: DebtId) -> DrainerResult<Option<Debt>> {
        self.storage.debts.get(id)
    }

    /// Find a debt by name or id
    pub fn find(&self, identifier: &str) -> DrainerResult<Option<Debt>> {
        if let Some(debt) = self.storage.debts.get_by_name(identifier)? {
            return Ok(Some(debt));
        }

        if let Ok(id) = identifier.trim().parse::<DebtId>() {
            return self.storage.debts.get(id);
        }

        Ok(self
            .storage
            .debts
            .get_all()?
            .into_iter()
            .find(|d| d.id.matches(identifier)))
    }

    pub fn require(&self, identifier: &str) -> DrainerResult<Debt> {
        self.find(identifier)?
            .ok_or_else(|| DrainerError::debt_not_found(identifier))
    }

    /// All debts by due day
    pub fn list(&self) -> DrainerResult<Vec<Debt>> {
        self.storage.debts.get_all()
    }

    /// Set or clear the daily micropayment
    pub fn set_micropayment(&self, id: DebtId, amount: Option<Money>) -> DrainerResult<Debt> {
        let mut debt = self
            .storage
            .debts
            .get(id)?
            .ok_or_else(|| DrainerError::debt_not_found(id.to_string()))?;

        if let Some(amount) = amount {
            if amount.is_negative() {
                return Err(DrainerError::Validation(format!(
                    "Micropayment cannot be negative: {}",
                    amount
                )));
            }
        }

        let before = debt.clone();
        debt.set_micropayment(amount.filter(|a| !a.is_zero()));

        self.storage.debts.commit(debt.clone())?;

        self.storage.log_update(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.name.clone()),
            &before,
            &debt,
        )?;

        Ok(debt)
    }

    pub fn delete(&self, id: DebtId) -> DrainerResult<Debt> {
        let debt = self
            .storage
            .debts
            .remove(id)?
            .ok_or_else(|| DrainerError::debt_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::Debt,
            debt.id.to_string(),
            Some(debt.name.clone()),
            &debt,
        )?;

        Ok(debt)
    }
}
