//! Micropayment CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::payment::format_payment_history;
use crate::error::{DrainerError, DrainerResult};
use crate::models::{PaymentFrequency, PaymentStatus, UserId};
use crate::services::{DebtService, LocalScheduler, MicroPaymentService};
use crate::storage::Storage;

use super::{parse_date, parse_money};

#[derive(Subcommand)]
pub enum PayCommands {
    /// Schedule a payment toward a debt
    Schedule {
        /// Debt name or ID
        debt: String,
        /// Amount, defaults to the debt's daily micropayment
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// daily, weekly or monthly
        #[arg(short, long, default_value = "daily")]
        frequency: String,
    },
    /// List your scheduled payments, newest first
    History,
    /// Record a payment status change
    Status {
        /// Payment ID
        payment: String,
        /// processing, completed or failed
        status: String,
    },
}

pub fn handle_pay_command(
    storage: &Storage,
    settings: &Settings,
    viewer: &UserId,
    cmd: PayCommands,
) -> DrainerResult<()> {
    let service = MicroPaymentService::new(storage, LocalScheduler::new(storage, settings));
    let debts = DebtService::new(storage);

    match cmd {
        PayCommands::Schedule {
            debt,
            amount,
            date,
            frequency,
        } => {
            let debt = debts.require(&debt)?;
            let amount = amount
                .as_deref()
                .map(|a| parse_money(a, "amount"))
                .transpose()?;
            let frequency: PaymentFrequency = frequency.parse().map_err(DrainerError::Validation)?;

            let payment = service.schedule(
                viewer,
                debt.id,
                amount,
                parse_date(date.as_deref())?,
                frequency,
            )?;

            println!(
                "Scheduled {} {} payment toward {} on {}",
                payment.amount,
                payment.frequency,
                debt.name,
                payment.date.format(&settings.date_format)
            );
            println!("  ID: {}", payment.id);
        }

        PayCommands::History => {
            let names: HashMap<_, _> = debts
                .list()?
                .into_iter()
                .map(|d| (d.id, d.name))
                .collect();
            print!("{}", format_payment_history(&service.history(viewer)?, &names));
        }

        PayCommands::Status { payment, status } => {
            let found = service
                .find(&payment)?
                .ok_or_else(|| DrainerError::micropayment_not_found(&payment))?;
            let status: PaymentStatus = status.parse().map_err(DrainerError::Validation)?;

            let updated = service.update_status(found.id, status)?;
            println!("Payment {} is now {}", updated.id, updated.status);
        }
    }

    Ok(())
}
