//! Credit score snapshot and improvement actions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest and highest score on the FICO-style scale
pub const MIN_SCORE: i32 = 300;
pub const MAX_SCORE: i32 = 850;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl ScoreBand {
    pub fn for_score(score: i32) -> Self {
        match score {
            s if s >= 800 => Self::Excellent,
            s if s >= 740 => Self::VeryGood,
            s if s >= 670 => Self::Good,
            s if s >= 580 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => write!(f, "Poor"),
            Self::Fair => write!(f, "Fair"),
            Self::Good => write!(f, "Good"),
            Self::VeryGood => write!(f, "Very Good"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditFactors {
    /// On-time payments, percent
    pub payment_history: u8,
    /// Balance over limit, percent
    pub credit_utilization: u8,
    /// Age of credit history in months
    pub credit_age_months: u32,
    /// Recently opened accounts
    pub new_credit: u32,
    /// Distinct account types
    pub credit_mix: u32,
}

/// Something the user can do to raise the score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAction {
    pub description: String,
    pub impact_points: i32,
    pub time_period: String,
}

impl CreditAction {
    pub fn new(
        description: impl Into<String>,
        impact_points: i32,
        time_period: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            impact_points,
            time_period: time_period.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScore {
    pub score: i32,
    pub last_updated: NaiveDate,
    pub factors: CreditFactors,
    #[serde(default)]
    pub actions: Vec<CreditAction>,
}

impl CreditScore {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

impl Default for CreditScore {
    fn default() -> Self {
        Self {
            score: 680,
            last_updated: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap_or_default(),
            factors: CreditFactors {
                payment_history: 98,
                credit_utilization: 45,
                credit_age_months: 72,
                new_credit: 2,
                credit_mix: 4,
            },
            actions: vec![
                CreditAction::new("Pay revolving balances below 30% utilization", 18, "1-3 months"),
                CreditAction::new("Pay down a second card below 30% utilization", 12, "1-2 months"),
                CreditAction::new("Make all monthly payments on time", 10, "3-6 months"),
            ],
        }
    }
}
