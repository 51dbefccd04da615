//! Budget totals
//!
//! Planned vs actual spending across every budget category.

use crate::models::{BudgetCategory, BudgetCategoryId, Money};

/// A row in the budget report for a single category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUsage {
    pub category_id: BudgetCategoryId,
    pub name: String,
    pub color: String,
    pub planned: Money,
    pub actual: Money,
    /// Actual as a whole percentage of planned
    pub percent_used: i64,
}

impl CategoryUsage {
    pub fn is_over_budget(&self) -> bool {
        self.actual > self.planned
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetTotals {
    pub planned: Money,
    pub actual: Money,
    /// Planned minus actual; negative when over budget
    pub difference: Money,
    pub categories: Vec<CategoryUsage>,
}

impl BudgetTotals {
    pub fn compute(categories: &[BudgetCategory]) -> Self {
        let mut totals = Self::default();

        for category in categories {
            totals.planned += category.planned;
            totals.actual += category.actual;
            totals.categories.push(CategoryUsage {
                category_id: category.id,
                name: category.name.clone(),
                color: category.color.clone(),
                planned: category.planned,
                actual: category.actual,
                percent_used: category.percent_used(),
            });
        }

        totals.difference = totals.planned - totals.actual;
        totals
    }

    pub fn is_over_budget(&self) -> bool {
        self.difference.is_negative()
    }

    pub fn percent_used(&self) -> i64 {
        self.actual.percent_of(self.planned)
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Budget Overview\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>12} {:>12} {:>8}\n",
            "Category", "Planned", "Actual", "Used"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.categories {
            let marker = if row.is_over_budget() { " *" } else { "" };
            output.push_str(&format!(
                "{:<28} {:>12} {:>12} {:>7}%{}\n",
                row.name, row.planned, row.actual, row.percent_used, marker
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>12} {:>12} {:>7}%\n",
            "TOTAL",
            self.planned,
            self.actual,
            self.percent_used()
        ));
        output.push_str(&format!("{:<28} {:>12}\n", "Remaining", self.difference));

        if self.is_over_budget() {
            output.push_str("\nOver budget by ");
            output.push_str(&self.difference.abs().to_string());
            output.push('\n');
        }
        if self.categories.iter().any(|c| c.is_over_budget()) {
            output.push_str("\n* = Over budget\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category_over_budget() {
        let food = BudgetCategory::new("Food", Money::from_dollars(500), Money::from_dollars(620));
        let totals = BudgetTotals::compute(&[food]);

        assert_eq!(totals.planned, Money::from_dollars(500));
        assert_eq!(totals.actual, Money::from_dollars(620));
        assert_eq!(totals.difference, Money::from_dollars(-120));
        assert!(totals.is_over_budget());
        assert_eq!(totals.categories[0].percent_used, 124);
        assert!(totals.format_terminal().contains("Over budget by $120.00"));
    }

    #[test]
    fn test_under_budget_with_one_overspent_category() {
        let categories = vec![
            BudgetCategory::new("Housing", Money::from_dollars(1200), Money::from_dollars(1200)),
            BudgetCategory::new("Food", Money::from_dollars(500), Money::from_dollars(520)),
            BudgetCategory::new("Fun", Money::from_dollars(150), Money::from_dollars(40)),
        ];
        let totals = BudgetTotals::compute(&categories);

        assert_eq!(totals.difference, Money::from_dollars(90));
        assert!(!totals.is_over_budget());
        let over: Vec<&str> = totals
            .categories
            .iter()
            .filter(|c| c.is_over_budget())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(over, vec!["Food"]);
    }

    #[test]
    fn test_empty_budget() {
        let totals = BudgetTotals::compute(&[]);
        assert_eq!(totals.difference, Money::zero());
        assert_eq!(totals.percent_used(), 0);
        assert!(!totals.is_over_budget());
    }
}
