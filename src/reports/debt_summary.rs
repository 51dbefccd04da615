//! Debt summary
//!
//! Balances, minimum payments and the daily micropayment plan.

use crate::error::{DrainerError, DrainerResult};
use crate::models::{Debt, Money};

/// Days used to project daily micropayments over a month
pub const MONTH_PROJECTION_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtSummary {
    pub debt_count: usize,
    pub total_balance: Money,
    pub total_min_payment: Money,
    pub daily_micropayments: Money,
    /// Daily micropayments times 30
    pub monthly_micropayments: Money,
}

impl DebtSummary {
    pub fn compute(debts: &[Debt]) -> DrainerResult<Self> {
        let mut summary = Self {
            debt_count: debts.len(),
            ..Self::default()
        };

        for debt in debts {
            summary.total_balance += debt.balance;
            summary.total_min_payment += debt.min_payment;
            summary.daily_micropayments += debt.daily_micropayment();
        }

        summary.monthly_micropayments = summary
            .daily_micropayments
            .times(MONTH_PROJECTION_DAYS)
            .ok_or_else(|| DrainerError::Validation("Micropayment projection overflowed".into()))?;

        Ok(summary)
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Debts ({})\n", self.debt_count));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>12}\n", "Total balance:", self.total_balance));
        output.push_str(&format!("{:<30} {:>12}\n", "Minimum payments:", self.total_min_payment));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Daily micropayments:", self.daily_micropayments
        ));
        output.push_str(&format!(
            "{:<30} {:>12}\n",
            "Monthly micropayments:", self.monthly_micropayments
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DebtCategory;

    #[test]
    fn test_totals_and_projection() {
        let mut visa = Debt::new("Visa", Money::from_dollars(2500), 15, DebtCategory::CreditCard);
        visa.min_payment = Money::from_dollars(75);
        visa.micropayment_amount = Some(Money::from_cents(250));

        let mut loan = Debt::new("Car", Money::from_dollars(9000), 1, DebtCategory::Loan);
        loan.min_payment = Money::from_dollars(310);
        loan.micropayment_amount = Some(Money::from_cents(125));

        let personal = Debt::new("Sam", Money::from_dollars(200), 20, DebtCategory::Personal);

        let summary = DebtSummary::compute(&[visa, loan, personal]).unwrap();
        assert_eq!(summary.debt_count, 3);
        assert_eq!(summary.total_balance, Money::from_dollars(11700));
        assert_eq!(summary.total_min_payment, Money::from_dollars(385));
        assert_eq!(summary.daily_micropayments, Money::from_cents(375));
        assert_eq!(summary.monthly_micropayments, Money::from_cents(11250));
    }

    #[test]
    fn test_no_debts() {
        let summary = DebtSummary::compute(&[]).unwrap();
        assert_eq!(summary, DebtSummary::default());
    }
}
