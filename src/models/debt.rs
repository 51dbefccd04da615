//! Debt model
//!
//! A debt the user is paying down, optionally with a small daily
//! micropayment on top of the monthly minimum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::DebtId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    CreditCard,
    Loan,
    Personal,
    #[default]
    Other,
}

impl fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Loan => write!(f, "Loan"),
            Self::Personal => write!(f, "Personal"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for DebtCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "credit_card" | "card" => Ok(Self::CreditCard),
            "loan" => Ok(Self::Loan),
            "personal" => Ok(Self::Personal),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Unknown debt category '{}'. Expected credit_card, loan, personal or other",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,

    pub name: String,

    pub balance: Money,

    /// Annual percentage rate, e.g. 24.99
    #[serde(default)]
    pub interest_rate: f64,

    #[serde(default)]
    pub min_payment: Money,

    /// Day of month the payment is due (1-31)
    pub due_day: u8,

    #[serde(default)]
    pub category: DebtCategory,

    /// Daily micropayment, if one is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micropayment_amount: Option<Money>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        balance: Money,
        due_day: u8,
        category: DebtCategory,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DebtId::new(),
            name: name.into(),
            balance,
            interest_rate: 0.0,
            min_payment: Money::zero(),
            due_day,
            category,
            micropayment_amount: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Daily micropayment, zero when none is configured
    pub fn daily_micropayment(&self) -> Money {
        self.micropayment_amount.unwrap_or_default()
    }

    pub fn set_micropayment(&mut self, amount: Option<Money>) {
        self.micropayment_amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.name.trim().is_empty() {
            return Err(DebtValidationError::EmptyName);
        }
        if self.balance.is_negative() {
            return Err(DebtValidationError::NegativeAmount("balance"));
        }
        if self.min_payment.is_negative() {
            return Err(DebtValidationError::NegativeAmount("minimum payment"));
        }
        if self.daily_micropayment().is_negative() {
            return Err(DebtValidationError::NegativeAmount("micropayment"));
        }
        if !(1..=31).contains(&self.due_day) {
            return Err(DebtValidationError::InvalidDueDay(self.due_day));
        }
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(DebtValidationError::InvalidInterestRate);
        }
        Ok(())
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebtValidationError {
    EmptyName,
    NegativeAmount(&'static str),
    InvalidDueDay(u8),
    InvalidInterestRate,
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Debt name cannot be empty"),
            Self::NegativeAmount(field) => write!(f, "Debt {} cannot be negative", field),
            Self::InvalidDueDay(day) => {
                write!(f, "Due day must be between 1 and 31, got {}", day)
            }
            Self::InvalidInterestRate => write!(f, "Interest rate must be a non-negative number"),
        }
    }
}

impl std::error::Error for DebtValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_due_day() {
        let mut debt = Debt::new("Visa", Money::from_dollars(2500), 31, DebtCategory::CreditCard);
        assert!(debt.validate().is_ok());

        debt.due_day = 0;
        assert_eq!(debt.validate(), Err(DebtValidationError::InvalidDueDay(0)));

        debt.due_day = 32;
        assert_eq!(debt.validate(), Err(DebtValidationError::InvalidDueDay(32)));
    }

    #[test]
    fn test_negative_micropayment_rejected() {
        let mut debt = Debt::new("Car loan", Money::from_dollars(9000), 15, DebtCategory::Loan);
        debt.set_micropayment(Some(Money::from_cents(-100)));
        assert_eq!(
            debt.validate(),
            Err(DebtValidationError::NegativeAmount("micropayment"))
        );
    }

    #[test]
    fn test_daily_micropayment_defaults_to_zero() {
        let debt = Debt::new("Visa", Money::from_dollars(100), 1, DebtCategory::CreditCard);
        assert!(debt.daily_micropayment().is_zero());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("credit-card".parse::<DebtCategory>().unwrap(), DebtCategory::CreditCard);
        assert_eq!("Loan".parse::<DebtCategory>().unwrap(), DebtCategory::Loan);
        assert!("mortgage".parse::<DebtCategory>().is_err());
    }
}
