//! Shared expense model
//!
//! An expense is paid up front by one user (the payer) and owed back in
//! shares by its participants. Participants are owned by their expense: they
//! are created with it, only ever have `paid` flipped afterwards, and are
//! removed only when the expense is deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::ids::{ExpenseId, ParticipantId, UserId};
use super::money::Money;

/// Closed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Housing,
    Utilities,
    Transportation,
    Entertainment,
    CreditCard,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Food,
            Self::Housing,
            Self::Utilities,
            Self::Transportation,
            Self::Entertainment,
            Self::CreditCard,
            Self::Other,
        ]
    }

    /// Wire name, as stored in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::CreditCard => "credit_card",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food => write!(f, "Food"),
            Self::Housing => write!(f, "Housing"),
            Self::Utilities => write!(f, "Utilities"),
            Self::Transportation => write!(f, "Transportation"),
            Self::Entertainment => write!(f, "Entertainment"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown expense category '{}'. Expected one of: {}",
                    s,
                    Self::all()
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// One user's share of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique within the owning expense
    pub id: ParticipantId,

    /// Who owes (or already paid) this share
    pub user_id: UserId,

    /// Display name copied at creation time; not authoritative
    #[serde(default)]
    pub name: String,

    pub amount: Money,

    #[serde(default)]
    pub paid: bool,
}

impl Participant {
    pub fn new(user_id: UserId, name: impl Into<String>, amount: Money, paid: bool) -> Self {
        Self {
            id: ParticipantId::new(),
            user_id,
            name: name.into(),
            amount,
            paid,
        }
    }

    /// Unpaid -> Paid. Returns false when the share was already paid.
    pub fn mark_paid(&mut self) -> bool {
        if self.paid {
            return false;
        }
        self.paid = true;
        true
    }
}

/// A shared expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub title: String,

    /// Total paid up front by the payer
    pub amount: Money,

    /// Transaction date, fixed at creation
    pub date: NaiveDate,

    #[serde(default)]
    pub category: ExpenseCategory,

    pub payer_id: UserId,

    /// Shares in display order
    #[serde(default)]
    pub participants: Vec<Participant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: ExpenseCategory,
        payer_id: UserId,
        participants: Vec<Participant>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            amount,
            date,
            category,
            payer_id,
            participants,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_payer(&self, user: &UserId) -> bool {
        &self.payer_id == user
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// The row belonging to `user`, if any
    pub fn share_of(&self, user: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.user_id == user)
    }

    /// Participants other than the payer who have not paid yet
    pub fn unpaid_others(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.participants
            .iter()
            .filter(move |p| p.user_id != self.payer_id && !p.paid)
    }

    /// Total still owed back to the payer
    pub fn outstanding(&self) -> Money {
        self.unpaid_others().map(|p| p.amount).sum()
    }

    pub fn shares_total(&self) -> Money {
        self.participants.iter().map(|p| p.amount).sum()
    }

    /// True when nobody owes the payer anything
    pub fn is_fully_settled(&self) -> bool {
        self.unpaid_others().next().is_none()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.participants.is_empty() {
            return Err(ExpenseValidationError::NoParticipants);
        }

        let mut ids = HashSet::new();
        let mut users = HashSet::new();
        for p in &self.participants {
            if p.amount.is_negative() {
                return Err(ExpenseValidationError::NegativeShare(p.user_id.clone()));
            }
            if !ids.insert(p.id) {
                return Err(ExpenseValidationError::DuplicateParticipantId(p.id));
            }
            if !users.insert(&p.user_id) {
                return Err(ExpenseValidationError::DuplicateUser(p.user_id.clone()));
            }
            if p.user_id == self.payer_id && !p.paid {
                return Err(ExpenseValidationError::PayerShareUnpaid);
            }
        }

        let shares_total = self.shares_total();
        if shares_total != self.amount {
            return Err(ExpenseValidationError::SharesMismatch {
                expense_amount: self.amount,
                shares_total,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    NegativeAmount(Money),
    NoParticipants,
    NegativeShare(UserId),
    DuplicateParticipantId(ParticipantId),
    DuplicateUser(UserId),
    PayerShareUnpaid,
    SharesMismatch {
        expense_amount: Money,
        shares_total: Money,
    },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative: {}", amount)
            }
            Self::NoParticipants => write!(f, "Expense must have at least one participant"),
            Self::NegativeShare(user) => write!(f, "Share for '{}' cannot be negative", user),
            Self::DuplicateParticipantId(id) => write!(f, "Duplicate participant id {}", id),
            Self::DuplicateUser(user) => write!(f, "User '{}' appears more than once", user),
            Self::PayerShareUnpaid => write!(f, "The payer's own share must be marked paid"),
            Self::SharesMismatch {
                expense_amount,
                shares_total,
            } => write!(
                f,
                "Shares total ({}) does not match expense amount ({})",
                shares_total, expense_amount
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
