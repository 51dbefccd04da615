//! Budget service
//!
//! Budget categories are created and then replaced wholesale; there is no
//! other lifecycle.

use crate::audit::EntityType;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{BudgetCategory, BudgetCategoryId, Money};
use crate::reports::BudgetTotals;
use crate::storage::Storage;

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        name: &str,
        planned: Money,
        actual: Money,
        color: Option<&str>,
    ) -> DrainerResult<BudgetCategory> {
        let name = name.trim();
        if self.storage.budget.get_by_name(name)?.is_some() {
            return Err(DrainerError::Validation(format!(
                "A budget category named '{}' already exists",
                name
            )));
        }

        let mut category = BudgetCategory::new(name, planned, actual);
        if let Some(color) = color {
            category = category.with_color(color);
        }
        category.validate().map_err(DrainerError::Validation)?;

        self.storage.budget.commit(category.clone())?;

        self.storage.log_create(
            EntityType::BudgetCategory,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Replace the planned and/or actual amount of a category
    pub fn replace(
        &self,
        id: BudgetCategoryId,
        planned: Option<Money>,
        actual: Option<Money>,
    ) -> DrainerResult<BudgetCategory> {
        let mut category = self
            .storage
            .budget
            .get(id)?
            .ok_or_else(|| DrainerError::budget_category_not_found(id.to_string()))?;
        let before = category.clone();

        category.replace(planned, actual);
        category.validate().map_err(DrainerError::Validation)?;

        self.storage.budget.commit(category.clone())?;

        self.storage.log_update(
            EntityType::BudgetCategory,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    pub fn find(&self, identifier: &str) -> DrainerResult<Option<BudgetCategory>> {
        if let Some(category) = self.storage.budget.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.trim().parse::<BudgetCategoryId>() {
            return self.storage.budget.get(id);
        }

        Ok(self
            .storage
            .budget
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    pub fn require(&self, identifier: &str) -> DrainerResult<BudgetCategory> {
        self.find(identifier)?
            .ok_or_else(|| DrainerError::budget_category_not_found(identifier))
    }

    pub fn list(&self) -> DrainerResult<Vec<BudgetCategory>> {
        self.storage.budget.get_all()
    }

    pub fn totals(&self) -> DrainerResult<BudgetTotals> {
        Ok(BudgetTotals::compute(&self.list()?))
    }

    pub fn delete(&self, id: BudgetCategoryId) -> DrainerResult<BudgetCategory> {
        let category = self
            .storage
            .budget
            .remove(id)?
            .ok_or_else(|| DrainerError::budget_category_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::BudgetCategory,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }
}
