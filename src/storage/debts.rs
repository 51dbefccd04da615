//! Debt repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DrainerError;
use crate::models::{Debt, DebtId};

use super::file_io::{read_json, write_json_atomic};
use super::{lock_error, persist_or_reload};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DebtData {
    debts: Vec<Debt>,
}

pub struct DebtRepository {
    path: PathBuf,
    data: RwLock<HashMap<DebtId, Debt>>,
}

impl DebtRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), DrainerError> {
        let file_data: DebtData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for debt in file_data.debts {
            data.insert(debt.id, debt);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), DrainerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut debts: Vec<_> = data.values().cloned().collect();
        debts.sort_by(|a, b| a.name.cmp(&b.name));

        write_json_atomic(&self.path, &DebtData { debts })
    }

    pub fn get(&self, id: DebtId) -> Result<Option<Debt>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// All debts sorted by due day, then name
    pub fn get_all(&self) -> Result<Vec<Debt>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut debts: Vec<_> = data.values().cloned().collect();
        debts.sort_by(|a, b| a.due_day.cmp(&b.due_day).then(a.name.cmp(&b.name)));
        Ok(debts)
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> Result<Option<Debt>, DrainerError> {
        let data = self.data.read().map_err(lock_error)?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|d| d.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Upsert and persist as one unit
    pub fn commit(&self, debt: Debt) -> Result<(), DrainerError> {
        self.upsert(debt)?;
        persist_or_reload("debts", || self.save(), || self.load())
    }

    /// Delete and persist as one unit
    pub fn remove(&self, id: DebtId) -> Result<Option<Debt>, DrainerError> {
        let removed = self.delete(id)?;
        if removed.is_some() {
            persist_or_reload("debts", || self.save(), || self.load())?;
        }
        Ok(removed)
    }

    pub fn upsert(&self, debt: Debt) -> Result<(), DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(debt.id, debt);
        Ok(())
    }

    pub fn delete(&self, id: DebtId) -> Result<Option<Debt>, DrainerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DebtCategory, Money};
    use tempfile::TempDir;

    #[test]
    fn test_sorted_by_due_day() {
        let temp_dir = TempDir::new().unwrap();
        let repo = DebtRepository::new(temp_dir.path().join("debts.json"));

        repo.upsert(Debt::new("Visa", Money::from_dollars(100), 20, DebtCategory::CreditCard))
            .unwrap();
        repo.upsert(Debt::new("Loan", Money::from_dollars(100), 5, DebtCategory::Loan))
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].name, "Loan");
        assert_eq!(all[1].name, "Visa");
    }

    #[test]
    fn test_save_reload_and_find_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("debts.json");
        let repo = DebtRepository::new(path.clone());
        let chase = Debt::new(
            "Chase Sapphire",
            Money::from_dollars(2500),
            12,
            DebtCategory::CreditCard,
        );
        repo.upsert(chase).unwrap();
        repo.save().unwrap();

        let reloaded = DebtRepository::new(path);
        reloaded.load().unwrap();
        assert!(reloaded.get_by_name("chase sapphire").unwrap().is_some());
    }
}
