//! Budget category repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DrainerError;
use crate::models::{BudgetCategory, BudgetCategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, persist_or_reload};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct BudgetData {
    pub categories: Vec<BudgetCategory>,
}

pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetCategoryId, BudgetCategory>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), DrainerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), DrainerError> {
        let categories = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { categories })
    }

    pub fn get(&self, id: BudgetCategoryId) -> Result<Option<BudgetCategory>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All categories in creation order
    pub fn get_all(&self) -> Result<Vec<BudgetCategory>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<BudgetCategory>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Upsert and persist as one unit
    pub fn commit(&self, category: BudgetCategory) -> Result<(), DrainerError> {
        self.upsert(category)?;
        persist_or_reload("budget", || self.save(), || self.load())
    }

    /// Delete and persist as one unit
    pub fn remove(&self, id: BudgetCategoryId) -> Result<Option<BudgetCategory>, DrainerError> {
        let removed = self.delete(id)?;
        if removed.is_some() {
            persist_or_reload("budget", || self.save(), || self.load())?;
        }
        Ok(removed)
    }

    pub fn upsert(&self, category: BudgetCategory) -> Result<(), DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: BudgetCategoryId) -> Result<Option<BudgetCategory>, DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_replaces_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.json"));

        let mut food = BudgetCategory::new("Food", Money::from_dollars(500), Money::zero());
        repo.upsert(food.clone()).unwrap();
        food.replace(None, Some(Money::from_dollars(620)));
        repo.upsert(food.clone()).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].actual, Money::from_dollars(620));
        assert!(repo.get_by_name("FOOD").unwrap().is_some());
    }
}
