//! Expense CLI commands
//!
//! Adding, listing and settling shared expenses.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list, format_settlement};
use crate::error::{DrainerError, DrainerResult};
use crate::models::{ExpenseCategory, ParticipantId, UserId};
use crate::services::classify::{ExpenseTab, ExpenseViewState, SortOrder};
use crate::services::{ExpenseService, NewExpense, SettlementService, SplitMember};
use crate::storage::Storage;

use super::{display_name, parse_date, parse_money};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a shared expense, split equally
    Add {
        /// What the expense was for
        title: String,
        /// Total amount (e.g., "120.50")
        amount: String,
        /// Someone sharing the cost, as USER or USER:NAME (repeatable)
        #[arg(short, long = "with", value_name = "USER[:NAME]")]
        with: Vec<String>,
        /// Category (food, housing, utilities, transportation, entertainment, credit_card, other)
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Who paid, defaults to you
        #[arg(long, value_name = "USER")]
        paid_by: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List expenses you are involved in
    List {
        /// Tab: all, owed, owe, settled
        #[arg(short, long, default_value = "all")]
        tab: String,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Sort: recent, oldest, highest, lowest
        #[arg(short, long, default_value = "recent")]
        sort: String,
    },
    /// Show expense details
    Show {
        /// Expense ID
        expense: String,
    },
    /// Settle your share, or everyone's if you paid
    Settle {
        /// Expense ID
        expense: String,
        /// Settle every outstanding share (payer only)
        #[arg(long, conflicts_with = "participant")]
        all: bool,
        /// Settle one participant by ID
        #[arg(long)]
        participant: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

fn parse_member(input: &str) -> DrainerResult<SplitMember> {
    let (user, name) = match input.split_once(':') {
        Some((user, name)) => (user.trim(), name.trim()),
        None => (input.trim(), ""),
    };
    if user.is_empty() {
        return Err(DrainerError::Validation(format!(
            "Invalid participant '{}'. Use USER or USER:NAME",
            input
        )));
    }
    Ok(SplitMember::new(user, name))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    viewer: &UserId,
    cmd: ExpenseCommands,
) -> DrainerResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            with,
            category,
            date,
            paid_by,
            notes,
        } => {
            let amount = parse_money(&amount, "amount")?;
            let category: ExpenseCategory = category.parse().map_err(DrainerError::Validation)?;
            let date = parse_date(date.as_deref())?;

            let payer_id = paid_by.map(UserId::from).unwrap_or_else(|| viewer.clone());
            let payer = SplitMember::new(payer_id.clone(), display_name(settings, &payer_id));

            let mut others = with
                .iter()
                .map(|w| parse_member(w))
                .collect::<DrainerResult<Vec<_>>>()?;
            // Recording someone else's expense puts the viewer in the split
            if &payer_id != viewer && !others.iter().any(|m| &m.user_id == viewer) {
                others.insert(0, SplitMember::new(viewer.clone(), display_name(settings, viewer)));
            }

            let expense = service.create(NewExpense {
                title,
                amount,
                date,
                category,
                payer,
                others,
                notes,
            })?;

            println!("Added expense: {}", expense.title);
            println!("  Amount: {}", expense.amount);
            for p in &expense.participants {
                println!(
                    "  {:<20} {:>12}{}",
                    p.name,
                    p.amount,
                    if p.paid { "  (paid)" } else { "" }
                );
            }
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            tab,
            category,
            sort,
        } => {
            let tab: ExpenseTab = tab.parse().map_err(DrainerError::Validation)?;
            let sort: SortOrder = sort.parse().map_err(DrainerError::Validation)?;
            let mut state = ExpenseViewState::new(tab).with_sort(sort);
            if let Some(category) = category {
                state = state.with_category(category.parse().map_err(DrainerError::Validation)?);
            }

            let rows = service.list(viewer, &state)?;
            print!("{}", format_expense_list(&rows, &settings.date_format));
        }

        ExpenseCommands::Show { expense } => {
            let found = service.require(&expense)?;
            print!("{}", format_expense_details(&found, viewer, &settings.date_format));

            let history = storage.audit().read_for_entity(&found.id.to_string())?;
            if !history.is_empty() {
                println!("\n  History:");
                for entry in history {
                    println!("    {}", entry.format_human_readable().replace('\n', "\n    "));
                }
            }
        }

        ExpenseCommands::Settle {
            expense,
            all,
            participant,
        } => {
            let found = service.require(&expense)?;
            let settlement = SettlementService::new(storage);

            let outcome = if all {
                settlement.settle_all(found.id, viewer)?
            } else if let Some(participant) = participant {
                let participant_id = found
                    .participants
                    .iter()
                    .find(|p| p.id.matches(&participant))
                    .map(|p| p.id)
                    .or_else(|| participant.parse::<ParticipantId>().ok())
                    .ok_or_else(|| DrainerError::participant_not_found(&participant))?;
                settlement.settle_participant(found.id, participant_id, viewer)?
            } else {
                settlement.settle(found.id, viewer)?
            };

            println!("{}", format_settlement(&outcome));
        }

        ExpenseCommands::Delete { expense } => {
            let found = service.require(&expense)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {} ({})", deleted.title, deleted.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_member() {
        let member = parse_member("u2:Blair").unwrap();
        assert_eq!(member.user_id, UserId::from("u2"));
        assert_eq!(member.name, "Blair");

        let bare = parse_member("u3").unwrap();
        assert_eq!(bare.name, "");

        assert!(parse_member(":Nobody").unwrap_err().is_validation());
    }
}
