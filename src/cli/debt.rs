//! Debt CLI commands

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::debt::{format_debt_details, format_debt_list, format_due_schedule};
use crate::error::{DrainerError, DrainerResult};
use crate::models::{DebtCategory, Money};
use crate::reports::DebtSummary;
use crate::services::due_date::due_schedule;
use crate::services::{DebtService, NewDebt};
use crate::storage::Storage;

use super::{parse_money, today};

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Add a debt
    Add {
        /// Debt name
        name: String,
        /// Current balance
        balance: String,
        /// Day of month the payment is due (1-31)
        #[arg(short = 'd', long)]
        due_day: u8,
        /// Minimum monthly payment
        #[arg(short, long, default_value = "0")]
        min_payment: String,
        /// Annual interest rate, percent
        #[arg(short = 'r', long, default_value_t = 0.0)]
        apr: f64,
        /// Category (credit_card, loan, personal, other)
        #[arg(short, long, default_value = "credit_card")]
        category: String,
        /// Daily micropayment amount
        #[arg(long)]
        daily: Option<String>,
    },
    /// List debts with totals
    List,
    /// Show debt details
    Show {
        /// Debt name or ID
        debt: String,
    },
    /// Due dates for a month
    Due {
        /// Month as YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Set the daily micropayment for a debt ("none" clears it)
    Micropay {
        /// Debt name or ID
        debt: String,
        /// Daily amount, or "none"
        amount: String,
    },
    /// Delete a debt
    Delete {
        /// Debt name or ID
        debt: String,
    },
}

fn parse_month(input: Option<&str>) -> DrainerResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| DrainerError::Validation(format!("Invalid month '{}'. Use YYYY-MM", s))),
        None => {
            let now = today();
            NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
                .ok_or_else(|| DrainerError::Validation("Invalid current month".into()))
        }
    }
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DebtCommands,
) -> DrainerResult<()> {
    let service = DebtService::new(storage);

    match cmd {
        DebtCommands::Add {
            name,
            balance,
            due_day,
            min_payment,
            apr,
            category,
            daily,
        } => {
            let category: DebtCategory = category.parse().map_err(DrainerError::Validation)?;
            let micropayment_amount = daily
                .as_deref()
                .map(|d| parse_money(d, "daily amount"))
                .transpose()?;

            let debt = service.create(NewDebt {
                name,
                balance: parse_money(&balance, "balance")?,
                interest_rate: apr,
                min_payment: parse_money(&min_payment, "minimum payment")?,
                due_day,
                category,
                micropayment_amount,
            })?;

            println!("Added debt: {}", debt.name);
            println!("  Balance: {}", debt.balance);
            println!("  Due on day {}", debt.due_day);
            println!("  ID: {}", debt.id);
        }

        DebtCommands::List => {
            let debts = service.list()?;
            print!("{}", format_debt_list(&debts));
            if !debts.is_empty() {
                println!();
                print!("{}", DebtSummary::compute(&debts)?.format_terminal());
            }
        }

        DebtCommands::Show { debt } => {
            let found = service.require(&debt)?;
            print!("{}", format_debt_details(&found));
        }

        DebtCommands::Due { month } => {
            let first = parse_month(month.as_deref())?;
            let items = due_schedule(
                &service.list()?,
                first.year(),
                first.month(),
                today(),
                settings.due_soon_days,
            )?;
            print!(
                "{}",
                format_due_schedule(&items, &first.format("%B %Y").to_string())
            );
        }

        DebtCommands::Micropay { debt, amount } => {
            let found = service.require(&debt)?;
            let amount = if amount.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_money(&amount, "daily amount")?)
            };

            let updated = service.set_micropayment(found.id, amount)?;
            match updated.micropayment_amount {
                Some(daily) => println!(
                    "Daily micropayment for {}: {} (about {} a month)",
                    updated.name,
                    daily,
                    daily.times(30).unwrap_or(Money::zero())
                ),
                None => println!("Cleared daily micropayment for {}", updated.name),
            }
        }

        DebtCommands::Delete { debt } => {
            let found = service.require(&debt)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted debt: {}", deleted.name);
        }
    }

    Ok(())
}
