//! Storage layer for Debt Drainer
//!
//! JSON file storage with atomic writes, one file per entity kind, plus the
//! append-only audit log.

pub mod budget;
pub mod debts;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod micropayments;

pub use budget::BudgetRepository;
pub use debts::DebtRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use micropayments::MicroPaymentRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::DrainerPaths;
use crate::error::{DrainerError, DrainerResult};

pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> DrainerError {
    DrainerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Write out a change already applied in memory
///
/// When the write fails the repository is reloaded from its last good file,
/// so no unsaved state stays visible, and the write error is returned.
pub(crate) fn persist_or_reload(
    what: &str,
    save: impl FnOnce() -> DrainerResult<()>,
    reload: impl FnOnce() -> DrainerResult<()>,
) -> DrainerResult<()> {
    if let Err(err) = save() {
        return match reload() {
            Ok(()) => Err(err),
            Err(reload_err) => Err(DrainerError::Storage(format!(
                "{}; reloading {} also failed: {}",
                err, what, reload_err
            ))),
        };
    }
    Ok(())
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: DrainerPaths,
    pub expenses: ExpenseRepository,
    pub debts: DebtRepository,
    pub budget: BudgetRepository,
    pub micropayments: MicroPaymentRepository,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: DrainerPaths) -> Result<Self, DrainerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            debts: DebtRepository::new(paths.debts_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            micropayments: MicroPaymentRepository::new(paths.micropayments_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &DrainerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), DrainerError> {
        self.expenses.load()?;
        self.debts.load()?;
        self.budget.load()?;
        self.micropayments.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DrainerError> {
        self.expenses.save()?;
        self.debts.save()?;
        self.budget.save()?;
        self.micropayments.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> DrainerResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> DrainerResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> DrainerResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Debt, DebtCategory, Money};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DrainerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_audit_helpers_append_entries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DrainerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let debt = Debt::new("Visa", Money::from_dollars(900), 15, DebtCategory::CreditCard);
        let mut paid_down = debt.clone();
        paid_down.balance = Money::from_dollars(850);

        storage
            .log_create(EntityType::Debt, debt.id.to_string(), Some(debt.name.clone()), &debt)
            .unwrap();
        storage
            .log_update(
                EntityType::Debt,
                debt.id.to_string(),
                Some(debt.name.clone()),
                &debt,
                &paid_down,
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Update);
        assert!(entries[1]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("balance"));
    }
}
