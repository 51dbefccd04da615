//! Classification engine
//!
//! Places an expense into exactly one bucket relative to a viewer, and
//! turns a list of expenses plus a view state into the rows of a tab.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseCategory, Money, UserId};

/// Where an expense stands from one viewer's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Viewer paid and someone else still owes them
    OwedToViewer,
    /// Viewer has an unpaid share of someone else's expense
    ViewerOwes,
    Settled,
    /// Viewer is neither the payer nor a participant
    NotInvolved,
}

impl Bucket {
    pub fn is_involved(&self) -> bool {
        !matches!(self, Self::NotInvolved)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwedToViewer => write!(f, "Owed to you"),
            Self::ViewerOwes => write!(f, "You owe"),
            Self::Settled => write!(f, "Settled"),
            Self::NotInvolved => write!(f, "Not involved"),
        }
    }
}

/// Classify `expense` for `viewer`
pub fn classify(expense: &Expense, viewer: &UserId) -> Bucket {
    if expense.is_payer(viewer) {
        let others_unpaid = expense
            .participants
            .iter()
            .any(|p| &p.user_id != viewer && !p.paid);
        return if others_unpaid {
            Bucket::OwedToViewer
        } else {
            Bucket::Settled
        };
    }

    match expense.share_of(viewer) {
        Some(share) if !share.paid => Bucket::ViewerOwes,
        Some(_) => Bucket::Settled,
        None => Bucket::NotInvolved,
    }
}

/// The amount that matters to the viewer for a given bucket
///
/// Outstanding total owed back for `OwedToViewer`, the viewer's own share for
/// `ViewerOwes`, zero otherwise.
pub fn viewer_amount(expense: &Expense, viewer: &UserId, bucket: Bucket) -> Money {
    match bucket {
        Bucket::OwedToViewer => expense
            .participants
            .iter()
            .filter(|p| &p.user_id != viewer && !p.paid)
            .map(|p| p.amount)
            .sum(),
        Bucket::ViewerOwes => expense.share_of(viewer).map(|p| p.amount).unwrap_or_default(),
        Bucket::Settled | Bucket::NotInvolved => Money::zero(),
    }
}

/// Tab selection on the expense list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseTab {
    #[default]
    All,
    Owed,
    Owe,
    Settled,
}

impl ExpenseTab {
    /// Whether an expense in `bucket` shows up on this tab
    pub fn includes(&self, bucket: Bucket) -> bool {
        match self {
            Self::All => bucket.is_involved(),
            Self::Owed => bucket == Bucket::OwedToViewer,
            Self::Owe => bucket == Bucket::ViewerOwes,
            Self::Settled => bucket == Bucket::Settled,
        }
    }
}

impl fmt::Display for ExpenseTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Owed => write!(f, "owed"),
            Self::Owe => write!(f, "owe"),
            Self::Settled => write!(f, "settled"),
        }
    }
}

impl FromStr for ExpenseTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "owed" => Ok(Self::Owed),
            "owe" => Ok(Self::Owe),
            "settled" => Ok(Self::Settled),
            _ => Err(format!(
                "Unknown tab '{}'. Expected all, owed, owe or settled",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest date first
    #[default]
    Recent,
    Oldest,
    /// Largest amount first
    Highest,
    Lowest,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recent => write!(f, "recent"),
            Self::Oldest => write!(f, "oldest"),
            Self::Highest => write!(f, "highest"),
            Self::Lowest => write!(f, "lowest"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" | "newest" => Ok(Self::Recent),
            "oldest" => Ok(Self::Oldest),
            "highest" => Ok(Self::Highest),
            "lowest" => Ok(Self::Lowest),
            _ => Err(format!(
                "Unknown sort '{}'. Expected recent, oldest, highest or lowest",
                s
            )),
        }
    }
}

/// Filter and sort selections for the expense list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpenseViewState {
    #[serde(default)]
    pub tab: ExpenseTab,

    /// `None` shows every category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,

    #[serde(default)]
    pub sort: SortOrder,
}

impl ExpenseViewState {
    pub fn new(tab: ExpenseTab) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// One row of an expense list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseView {
    pub expense: Expense,
    pub bucket: Bucket,
    pub viewer_amount: Money,
}

impl ExpenseView {
    pub fn new(expense: Expense, viewer: &UserId) -> Self {
        let bucket = classify(&expense, viewer);
        let viewer_amount = viewer_amount(&expense, viewer, bucket);
        Self {
            expense,
            bucket,
            viewer_amount,
        }
    }
}

/// Bucket filter, then category filter, then a stable sort
pub fn apply_view(
    expenses: &[Expense],
    viewer: &UserId,
    state: &ExpenseViewState,
) -> Vec<ExpenseView> {
    let mut rows: Vec<ExpenseView> = expenses
        .iter()
        .map(|e| ExpenseView::new(e.clone(), viewer))
        .filter(|row| state.tab.includes(row.bucket))
        .filter(|row| state.category.map_or(true, |c| row.expense.category == c))
        .collect();

    match state.sort {
        SortOrder::Recent => rows.sort_by(|a, b| b.expense.date.cmp(&a.expense.date)),
        SortOrder::Oldest => rows.sort_by(|a, b| a.expense.date.cmp(&b.expense.date)),
        SortOrder::Highest => rows.sort_by(|a, b| b.expense.amount.cmp(&a.expense.amount)),
        SortOrder::Lowest => rows.sort_by(|a, b| a.expense.amount.cmp(&b.expense.amount)),
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;
    use chrono::NaiveDate;

    fn dinner() -> Expense {
        Expense::new(
            "Dinner",
            Money::from_cents(12050),
            NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            ExpenseCategory::Food,
            "u1".into(),
            vec![
                Participant::new("u1".into(), "Alex", Money::from_cents(3013), true),
                Participant::new("u2".into(), "Blair", Money::from_cents(3012), false),
                Participant::new("u3".into(), "Casey", Money::from_cents(3012), false),
                Participant::new("u4".into(), "Dana", Money::from_cents(3013), false),
            ],
        )
    }

    fn simple(
        title: &str,
        payer: &str,
        other: &str,
        cents: i64,
        day: u32,
        category: ExpenseCategory,
    ) -> Expense {
        let half = cents / 2;
        Expense::new(
            title,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            category,
            payer.into(),
            vec![
                Participant::new(payer.into(), payer, Money::from_cents(cents - half), true),
                Participant::new(other.into(), other, Money::from_cents(half), false),
            ],
        )
    }

    #[test]
    fn test_payer_with_unpaid_shares_is_owed() {
        let expense = dinner();
        let viewer = UserId::from("u1");
        assert_eq!(classify(&expense, &viewer), Bucket::OwedToViewer);
        assert_eq!(
            viewer_amount(&expense, &viewer, Bucket::OwedToViewer),
            Money::from_cents(9037)
        );
    }

    #[test]
    fn test_participant_with_unpaid_share_owes() {
        let expense = dinner();
        let viewer = UserId::from("u2");
        let row = ExpenseView::new(expense, &viewer);
        assert_eq!(row.bucket, Bucket::ViewerOwes);
        assert_eq!(row.viewer_amount, Money::from_cents(3012));
    }

    #[test]
    fn test_settled_cases() {
        let mut expense = dinner();
        expense.participants[1].paid = true;
        assert_eq!(classify(&expense, &"u2".into()), Bucket::Settled);

        for p in &mut expense.participants {
            p.paid = true;
        }
        assert_eq!(classify(&expense, &"u1".into()), Bucket::Settled);
    }

    #[test]
    fn test_outsider_is_not_involved() {
        let expense = dinner();
        let viewer = UserId::from("u9");
        assert_eq!(classify(&expense, &viewer), Bucket::NotInvolved);
        assert_eq!(
            viewer_amount(&expense, &viewer, Bucket::NotInvolved),
            Money::zero()
        );
    }

    #[test]
    fn test_payer_without_own_row() {
        let mut expense = dinner();
        expense.participants.remove(0);
        expense.amount = expense.shares_total();
        assert_eq!(classify(&expense, &"u1".into()), Bucket::OwedToViewer);
    }

    #[test]
    fn test_every_involved_viewer_gets_one_bucket() {
        let mut expense = dinner();
        for step in 0..=expense.participants.len() {
            if step > 0 {
                expense.participants[step - 1].paid = true;
            }
            for p in &expense.participants {
                let bucket = classify(&expense, &p.user_id);
                assert!(bucket.is_involved());
                let tabs = [ExpenseTab::Owed, ExpenseTab::Owe, ExpenseTab::Settled];
                assert_eq!(tabs.iter().filter(|t| t.includes(bucket)).count(), 1);
            }
        }
    }

    #[test]
    fn test_all_tab_excludes_not_involved() {
        let expenses = vec![
            dinner(),
            simple("Cab", "u5", "u6", 2000, 3, ExpenseCategory::Transportation),
        ];
        let rows = apply_view(&expenses, &"u2".into(), &ExpenseViewState::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expense.title, "Dinner");
    }

    #[test]
    fn test_filter_order_and_sorting() {
        let expenses = vec![
            simple("Groceries", "me", "u2", 4000, 1, ExpenseCategory::Food),
            simple("Rent", "me", "u2", 90000, 2, ExpenseCategory::Housing),
            simple("Lunch", "u2", "me", 2400, 3, ExpenseCategory::Food),
            simple("Brunch", "me", "u3", 6000, 4, ExpenseCategory::Food),
        ];
        let viewer = UserId::from("me");

        let owed_food = apply_view(
            &expenses,
            &viewer,
            &ExpenseViewState::new(ExpenseTab::Owed)
                .with_category(ExpenseCategory::Food)
                .with_sort(SortOrder::Highest),
        );
        let titles: Vec<&str> = owed_food.iter().map(|r| r.expense.title.as_str()).collect();
        assert_eq!(titles, vec!["Brunch", "Groceries"]);

        let all_oldest = apply_view(
            &expenses,
            &viewer,
            &ExpenseViewState::default().with_sort(SortOrder::Oldest),
        );
        assert_eq!(all_oldest[0].expense.title, "Groceries");
        assert_eq!(all_oldest.len(), 4);

        let owe = apply_view(&expenses, &viewer, &ExpenseViewState::new(ExpenseTab::Owe));
        assert_eq!(owe.len(), 1);
        assert_eq!(owe[0].viewer_amount, Money::from_cents(1200));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let expenses = vec![
            simple("First", "me", "u2", 1000, 5, ExpenseCategory::Other),
            simple("Second", "me", "u2", 1000, 5, ExpenseCategory::Other),
        ];
        for sort in [SortOrder::Recent, SortOrder::Lowest] {
            let rows = apply_view(
                &expenses,
                &"me".into(),
                &ExpenseViewState::default().with_sort(sort),
            );
            assert_eq!(rows[0].expense.title, "First");
        }
    }

    #[test]
    fn test_view_state_serializes() {
        let state = ExpenseViewState::new(ExpenseTab::Owe)
            .with_category(ExpenseCategory::CreditCard)
            .with_sort(SortOrder::Lowest);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"owe\""));
        assert!(json.contains("\"credit_card\""));
        let back: ExpenseViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let empty: ExpenseViewState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ExpenseViewState::default());
    }
}
