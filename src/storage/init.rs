//! Storage initialization
//!
//! Handles first-run setup and the starter budget categories

use crate::config::paths::DrainerPaths;
use crate::config::settings::Settings;
use crate::error::DrainerError;
use crate::models::{BudgetCategory, Money};

use super::budget::BudgetData;
use super::file_io::write_json_atomic;

/// Starter categories: name, planned dollars, display color
const DEFAULT_CATEGORIES: &[(&str, i64, &str)] = &[
    ("Housing", 1200, "#10B981"),
    ("Food", 500, "#F59E0B"),
    ("Transportation", 200, "#3B82F6"),
    ("Entertainment", 150, "#8B5CF6"),
    ("Utilities", 250, "#EC4899"),
    ("Debt Payments", 400, "#6366F1"),
];

/// Initialize storage for a fresh installation
///
/// Writes settings and the starter budget categories unless they already
/// exist. Safe to call again on an initialized directory.
pub fn initialize_storage(paths: &DrainerPaths, settings: &Settings) -> Result<(), DrainerError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !paths.budget_file().exists() {
        create_default_categories(paths)?;
    }

    Ok(())
}

fn create_default_categories(paths: &DrainerPaths) -> Result<(), DrainerError> {
    let categories = DEFAULT_CATEGORIES
        .iter()
        .map(|(name, planned, color)| {
            BudgetCategory::new(*name, Money::from_dollars(*planned), Money::zero())
                .with_color(*color)
        })
        .collect();

    write_json_atomic(paths.budget_file(), &BudgetData { categories })
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &DrainerPaths) -> bool {
    !paths.settings_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BudgetRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_settings_and_categories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DrainerPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(needs_initialization(&paths));

        initialize_storage(&paths, &Settings::default()).unwrap();
        assert!(!needs_initialization(&paths));

        let repo = BudgetRepository::new(paths.budget_file());
        repo.load().unwrap();
        let categories = repo.get_all().unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        let planned: Money = categories.iter().map(|c| c.planned).sum();
        assert_eq!(planned, Money::from_dollars(2700));
    }

    #[test]
    fn test_initialize_keeps_existing_budget() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DrainerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();

        let repo = BudgetRepository::new(paths.budget_file());
        repo.load().unwrap();
        let food = repo.get_by_name("Food").unwrap().unwrap();
        repo.delete(food.id).unwrap();
        repo.save().unwrap();

        initialize_storage(&paths, &Settings::default()).unwrap();
        repo.load().unwrap();
        assert_eq!(repo.get_all().unwrap().len(), DEFAULT_CATEGORIES.len() - 1);
    }
}
