//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Expense,
    Debt,
    BudgetCategory,
    MicroPayment,
    Settings,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Debt => write!(f, "Debt"),
            EntityType::BudgetCategory => write!(f, "BudgetCategory"),
            EntityType::MicroPayment => write!(f, "MicroPayment"),
            EntityType::Settings => write!(f, "Settings"),
        }
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Human-readable label (expense title, debt name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Entity state before an update or delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entity state after a create or update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Create, entity_type, entity_id.into(), entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Update entry; the diff summary is computed from the two states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Update, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        if let (Some(b), Some(a)) = (&entry.before, &entry.after) {
            entry.diff_summary = super::diff::generate_diff(b, a);
        }
        entry
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_entry_computes_diff() {
        let before = json!({"name": "Food", "actual": 50000});
        let after = json!({"name": "Food", "actual": 62000});

        let entry = AuditEntry::update(
            EntityType::BudgetCategory,
            "bud-12345678",
            Some("Food".to_string()),
            &before,
            &after,
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.diff_summary.as_deref(), Some("actual: 50000 -> 62000"));
    }

    #[test]
    fn test_create_and_delete_entries() {
        let data = json!({"title": "Dinner"});
        let created = AuditEntry::create(EntityType::Expense, "exp-1", None, &data);
        assert!(created.before.is_none());
        assert!(created.after.is_some());

        let deleted = AuditEntry::delete(EntityType::Expense, "exp-1", None, &data);
        assert!(deleted.before.is_some());
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::create(EntityType::Debt, "debt-1", None, &json!({}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("before"));
        assert!(line.contains("\"entity_type\":\"debt\""));

        let back: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(back.entity_type, EntityType::Debt);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Expense,
            "exp-12345678",
            Some("Dinner".to_string()),
            &json!({}),
        );
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Expense exp-12345678 (Dinner)"));
    }
}
