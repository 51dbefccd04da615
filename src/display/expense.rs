//! Expense display formatting
//!
//! Formats expense lists and single-expense details relative to a viewer.

use crate::models::{Expense, UserId};
use crate::services::classify::{classify, Bucket, ExpenseView};
use crate::services::settlement::SettlementOutcome;

fn short_status(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::OwedToViewer => "Owed",
        Bucket::ViewerOwes => "Owe",
        Bucket::Settled => "Settled",
        Bucket::NotInvolved => "-",
    }
}

/// Format a list of expense rows as a table
pub fn format_expense_list(rows: &[ExpenseView], date_format: &str) -> String {
    if rows.is_empty() {
        return "No expenses found.".to_string();
    }

    let title_width = rows
        .iter()
        .map(|r| r.expense.title.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14}  {:<10}  {:<title_width$}  {:<14}  {:>12}  {:<8}  {:>12}\n",
        "ID",
        "Date",
        "Title",
        "Category",
        "Amount",
        "Status",
        "Yours",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:-<14}  {:-<10}  {:-<title_width$}  {:-<14}  {:->12}  {:-<8}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for row in rows {
        let title: String = row.expense.title.chars().take(title_width).collect();
        output.push_str(&format!(
            "{:<14}  {:<10}  {:<title_width$}  {:<14}  {:>12}  {:<8}  {:>12}\n",
            row.expense.id.to_string(),
            row.expense.date.format(date_format).to_string(),
            title,
            row.expense.category.to_string(),
            row.expense.amount,
            short_status(row.bucket),
            row.viewer_amount,
            title_width = title_width,
        ));
    }

    output
}

/// Format full details of an expense for `viewer`
pub fn format_expense_details(expense: &Expense, viewer: &UserId, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Date:      {}\n", expense.date.format(date_format)));
    output.push_str(&format!("  Category:  {}\n", expense.category));
    output.push_str(&format!("  Amount:    {}\n", expense.amount));
    output.push_str(&format!("  Paid by:   {}\n", expense.payer_id));
    output.push_str(&format!("  Status:    {}\n", classify(expense, viewer)));
    output.push_str(&format!("  Outstanding: {}\n", expense.outstanding()));
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("  Notes:     {}\n", notes));
    }

    output.push_str("\n  Participants:\n");
    for p in &expense.participants {
        let mut tags = Vec::new();
        if p.user_id == expense.payer_id {
            tags.push("payer");
        }
        if &p.user_id == viewer {
            tags.push("you");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" ({})", tags.join(", "))
        };

        output.push_str(&format!(
            "    [{}] {:<20} {:>12}  {}{}\n",
            if p.paid { "x" } else { " " },
            p.name,
            p.amount,
            p.id,
            tags
        ));
    }

    output
}

pub fn format_settlement(outcome: &SettlementOutcome) -> String {
    if outcome.is_noop() {
        return format!("Nothing to settle on '{}'.", outcome.expense.title);
    }

    let names: Vec<&str> = outcome
        .settled
        .iter()
        .filter_map(|id| outcome.expense.participant(*id))
        .map(|p| p.name.as_str())
        .collect();

    let mut output = format!(
        "Settled {} share(s) on '{}': {}",
        outcome.settled.len(),
        outcome.expense.title,
        names.join(", ")
    );
    if outcome.expense.is_fully_settled() {
        output.push_str("\nExpense is fully settled.");
    } else {
        output.push_str(&format!("\nStill outstanding: {}", outcome.expense.outstanding()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money, Participant};
    use chrono::NaiveDate;

    fn dinner() -> Expense {
        Expense::new(
            "Dinner",
            Money::from_cents(3000),
            NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            ExpenseCategory::Food,
            "u1".into(),
            vec![
                Participant::new("u1".into(), "Alex", Money::from_cents(1500), true),
                Participant::new("u2".into(), "Blair", Money::from_cents(1500), false),
            ],
        )
    }

    #[test]
    fn test_list_shows_viewer_amount() {
        let viewer = UserId::from("u2");
        let rows = vec![ExpenseView::new(dinner(), &viewer)];
        let output = format_expense_list(&rows, "%Y-%m-%d");
        assert!(output.contains("2024-04-12"));
        assert!(output.contains("Owe"));
        assert!(output.contains("$15.00"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], "%Y-%m-%d"), "No expenses found.");
    }

    #[test]
    fn test_details_mark_payer_and_viewer() {
        let output = format_expense_details(&dinner(), &"u2".into(), "%Y-%m-%d");
        assert!(output.contains("Alex"));
        assert!(output.contains("(payer)"));
        assert!(output.contains("(you)"));
        assert!(output.contains("You owe"));
    }
}
