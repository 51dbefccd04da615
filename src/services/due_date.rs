//! Due-date calculator
//!
//! Debts carry a day of the month. A day past the end of a short month is
//! clamped to that month's last day.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{DrainerError, DrainerResult};
use crate::models::{Debt, DebtId, Money};

/// Default window for "due soon"
pub const DEFAULT_DUE_SOON_DAYS: u32 = 7;

fn days_in_month(year: i32, month: u32) -> DrainerResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DrainerError::Validation(format!("Invalid month {}-{:02}", year, month)))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| DrainerError::Validation(format!("Month out of range: {}-{:02}", year, month)))?;

    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// The calendar date of `day` in the given month
///
/// # Examples
/// ```
/// use debt_drainer::services::due_date::due_date_in_month;
/// let date = due_date_in_month(31, 2024, 4).unwrap();
/// assert_eq!(date.to_string(), "2024-04-30");
/// ```
pub fn due_date_in_month(day: u8, year: i32, month: u32) -> DrainerResult<NaiveDate> {
    if !(1..=31).contains(&day) {
        return Err(DrainerError::Validation(format!(
            "Due day must be between 1 and 31, got {}",
            day
        )));
    }

    let last = days_in_month(year, month)?;
    let clamped = u32::from(day).min(last);
    NaiveDate::from_ymd_opt(year, month, clamped)
        .ok_or_else(|| {
            DrainerError::Validation(format!(
                "Invalid date {}-{:02}-{:02}",
                year, month, clamped
            ))
        })
}

/// The first occurrence of `day` on or after `today`
pub fn next_due_date(day: u8, today: NaiveDate) -> DrainerResult<NaiveDate> {
    let this_month = due_date_in_month(day, today.year(), today.month())?;
    if this_month >= today {
        return Ok(this_month);
    }
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    due_date_in_month(day, year, month)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    DueToday,
    PastDue,
    DueSoon,
    Upcoming,
}

impl DueStatus {
    /// Status of a payment due on `due` as seen on `today`
    pub fn classify(today: NaiveDate, due: NaiveDate, due_soon_days: u32) -> Self {
        let days = due.signed_duration_since(today).num_days();
        if days == 0 {
            Self::DueToday
        } else if days < 0 {
            Self::PastDue
        } else if days <= i64::from(due_soon_days) {
            Self::DueSoon
        } else {
            Self::Upcoming
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DueToday => write!(f, "Due Today"),
            Self::PastDue => write!(f, "Past Due"),
            Self::DueSoon => write!(f, "Due Soon"),
            Self::Upcoming => write!(f, "Upcoming"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueItem {
    pub debt_id: DebtId,
    pub name: String,
    pub due_date: NaiveDate,
    pub min_payment: Money,
    pub status: DueStatus,
    /// Negative when past due
    pub days_until: i64,
}

/// One entry per debt for the given month, sorted by date then name
pub fn due_schedule(
    debts: &[Debt],
    year: i32,
    month: u32,
    today: NaiveDate,
    due_soon_days: u32,
) -> DrainerResult<Vec<DueItem>> {
    let mut items = debts
        .iter()
        .map(|debt| {
            let due_date = due_date_in_month(debt.due_day, year, month)?;
            Ok(DueItem {
                debt_id: debt.id,
                name: debt.name.clone(),
                due_date,
                min_payment: debt.min_payment,
                status: DueStatus::classify(today, due_date, due_soon_days),
                days_until: due_date.signed_duration_since(today).num_days(),
            })
        })
        .collect::<DrainerResult<Vec<_>>>()?;

    items.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.name.cmp(&b.name)));
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DebtCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_31_clamps_in_thirty_day_month() {
        assert_eq!(due_date_in_month(31, 2024, 4).unwrap(), date(2024, 4, 30));
        assert_eq!(due_date_in_month(31, 2024, 5).unwrap(), date(2024, 5, 31));
    }

    #[test]
    fn test_february_clamping() {
        assert_eq!(due_date_in_month(30, 2023, 2).unwrap(), date(2023, 2, 28));
        assert_eq!(due_date_in_month(29, 2024, 2).unwrap(), date(2024, 2, 29));
        assert_eq!(due_date_in_month(31, 2024, 2).unwrap(), date(2024, 2, 29));
        assert_eq!(due_date_in_month(15, 2024, 2).unwrap(), date(2024, 2, 15));
    }

    #[test]
    fn test_december_and_invalid_input() {
        assert_eq!(due_date_in_month(31, 2024, 12).unwrap(), date(2024, 12, 31));
        assert!(due_date_in_month(0, 2024, 1).unwrap_err().is_validation());
        assert!(due_date_in_month(32, 2024, 1).unwrap_err().is_validation());
        assert!(due_date_in_month(1, 2024, 13).unwrap_err().is_validation());
    }

    #[test]
    fn test_status_boundaries() {
        let today = date(2024, 4, 10);
        assert_eq!(DueStatus::classify(today, today, 7), DueStatus::DueToday);
        assert_eq!(DueStatus::classify(today, date(2024, 4, 9), 7), DueStatus::PastDue);
        assert_eq!(DueStatus::classify(today, date(2024, 4, 11), 7), DueStatus::DueSoon);
        assert_eq!(DueStatus::classify(today, date(2024, 4, 17), 7), DueStatus::DueSoon);
        assert_eq!(DueStatus::classify(today, date(2024, 4, 18), 7), DueStatus::Upcoming);
        assert_eq!(DueStatus::classify(today, date(2024, 4, 12), 1), DueStatus::Upcoming);
    }

    #[test]
    fn test_next_due_date_rolls_over() {
        assert_eq!(next_due_date(5, date(2024, 4, 5)).unwrap(), date(2024, 4, 5));
        assert_eq!(next_due_date(5, date(2024, 4, 6)).unwrap(), date(2024, 5, 5));
        assert_eq!(next_due_date(31, date(2024, 12, 31)).unwrap(), date(2024, 12, 31));
        assert_eq!(next_due_date(1, date(2024, 12, 2)).unwrap(), date(2025, 1, 1));
        assert_eq!(next_due_date(31, date(2024, 1, 31)).unwrap(), date(2024, 1, 31));
    }

    #[test]
    fn test_schedule_sorted_by_date_then_name() {
        let mut visa = Debt::new("Visa", Money::from_dollars(900), 31, DebtCategory::CreditCard);
        visa.min_payment = Money::from_dollars(35);
        let loan = Debt::new("Car Loan", Money::from_dollars(9000), 30, DebtCategory::Loan);
        let amex = Debt::new("Amex", Money::from_dollars(500), 2, DebtCategory::CreditCard);

        let items = due_schedule(&[visa, loan, amex], 2024, 4, date(2024, 4, 25), 7).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        // Visa's 31st clamps to the 30th and ties with the car loan
        assert_eq!(names, vec!["Amex", "Car Loan", "Visa"]);
        assert_eq!(items[0].status, DueStatus::PastDue);
        assert_eq!(items[2].status, DueStatus::DueSoon);
        assert_eq!(items[2].days_until, 5);
        assert_eq!(items[2].min_payment, Money::from_dollars(35));
    }
}
