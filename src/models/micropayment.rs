//! Scheduled micropayments toward a debt

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{DebtId, MicroPaymentId, UserId};
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!(
                "Unknown frequency '{}'. Expected daily, weekly or monthly",
                s
            )),
        }
    }
}

/// Lifecycle: Pending -> Processing -> Completed | Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Pending, Self::Failed)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown payment status '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroPayment {
    pub id: MicroPaymentId,

    pub user_id: UserId,

    pub debt_id: DebtId,

    pub amount: Money,

    /// Date the payment should be made
    pub date: NaiveDate,

    #[serde(default)]
    pub frequency: PaymentFrequency,

    #[serde(default)]
    pub status: PaymentStatus,

    /// Reference assigned by the payment provider, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl MicroPayment {
    pub fn new(
        user_id: UserId,
        debt_id: DebtId,
        amount: Money,
        date: NaiveDate,
        frequency: PaymentFrequency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MicroPaymentId::new(),
            user_id,
            debt_id,
            amount,
            date,
            frequency,
            status: PaymentStatus::Pending,
            provider_ref: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: PaymentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
        assert!(Failed.is_terminal());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("Weekly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Weekly);
        assert!("hourly".parse::<PaymentFrequency>().is_err());
    }
}
