//! Debt display formatting

use crate::models::{Debt, Money};
use crate::services::due_date::DueItem;

/// Format debts as a table
pub fn format_debt_list(debts: &[Debt]) -> String {
    if debts.is_empty() {
        return "No debts found.".to_string();
    }

    let name_width = debts
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<12}  {:>12}  {:>7}  {:>10}  {:>4}  {:>10}\n",
        "Name",
        "Category",
        "Balance",
        "APR",
        "Min",
        "Due",
        "Daily",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<12}  {:->12}  {:->7}  {:->10}  {:->4}  {:->10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for debt in debts {
        let daily = match debt.micropayment_amount {
            Some(amount) => amount.to_string(),
            None => "-".to_string(),
        };
        output.push_str(&format!(
            "{:<name_width$}  {:<12}  {:>12}  {:>6.2}%  {:>10}  {:>4}  {:>10}\n",
            debt.name,
            debt.category.to_string(),
            debt.balance,
            debt.interest_rate,
            debt.min_payment,
            debt.due_day,
            daily,
            name_width = name_width,
        ));
    }

    let total: Money = debts.iter().map(|d| d.balance).sum();
    output.push_str(&format!(
        "{:<name_width$}  {:<12}  {:>12}\n",
        "Total",
        "",
        total,
        name_width = name_width,
    ));

    output
}

/// Format the due-date schedule for a month
pub fn format_due_schedule(items: &[DueItem], heading: &str) -> String {
    let mut output = format!("Due Dates for {}\n", heading);
    if items.is_empty() {
        output.push_str("No debts due this month.\n");
        return output;
    }

    for item in items {
        output.push_str(&format!(
            "  {:<24} {:>10} due {}  [{}]\n",
            item.name,
            item.min_payment,
            item.due_date.format("%B %-d"),
            item.status
        ));
    }

    output
}

pub fn format_debt_details(debt: &Debt) -> String {
    let mut output = String::new();
    output.push_str(&format!("Debt: {}\n", debt.name));
    output.push_str(&format!("  ID:          {}\n", debt.id));
    output.push_str(&format!("  Category:    {}\n", debt.category));
    output.push_str(&format!("  Balance:     {}\n", debt.balance));
    output.push_str(&format!("  APR:         {:.2}%\n", debt.interest_rate));
    output.push_str(&format!("  Min payment: {}\n", debt.min_payment));
    output.push_str(&format!("  Due day:     {}\n", debt.due_day));
    if let Some(amount) = debt.micropayment_amount {
        output.push_str(&format!("  Daily:       {}\n", amount));
    }
    output
}
