//! Monthly budget category: a planned amount against actual spending

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetCategoryId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: BudgetCategoryId,

    pub name: String,

    /// Expected to be positive, not enforced
    pub planned: Money,

    #[serde(default)]
    pub actual: Money,

    /// Display color, e.g. "#10B981"
    #[serde(default = "default_color")]
    pub color: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    "#6366F1".to_string()
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>, planned: Money, actual: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetCategoryId::new(),
            name: name.into(),
            planned,
            actual,
            color: default_color(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Planned minus actual; negative when overspent
    pub fn remaining(&self) -> Money {
        self.planned - self.actual
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual > self.planned
    }

    pub fn percent_used(&self) -> i64 {
        self.actual.percent_of(self.planned)
    }

    /// Replace planned and/or actual
    pub fn replace(&mut self, planned: Option<Money>, actual: Option<Money>) {
        if let Some(planned) = planned {
            self.planned = planned;
        }
        if let Some(actual) = actual {
            self.actual = actual;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Budget category name cannot be empty".into());
        }
        if self.planned.is_negative() || self.actual.is_negative() {
            return Err("Budget amounts cannot be negative".into());
        }
        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} of {}", self.name, self.actual, self.planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_budget() {
        let food = BudgetCategory::new("Food", Money::from_dollars(500), Money::from_dollars(620));
        assert!(food.is_over_budget());
        assert_eq!(food.remaining(), Money::from_dollars(-120));
        assert_eq!(food.percent_used(), 124);
    }

    #[test]
    fn test_replace() {
        let mut cat = BudgetCategory::new("Fun", Money::from_dollars(150), Money::zero());
        cat.replace(None, Some(Money::from_dollars(90)));
        assert_eq!(cat.planned, Money::from_dollars(150));
        assert_eq!(cat.actual, Money::from_dollars(90));
        assert!(!cat.is_over_budget());
    }

    #[test]
    fn test_validate() {
        let cat = BudgetCategory::new(" ", Money::from_dollars(1), Money::zero());
        assert!(cat.validate().is_err());
    }
}
