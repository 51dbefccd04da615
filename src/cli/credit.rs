//! Credit score CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::payment::{format_credit_score, format_simulation};
use crate::error::{DrainerError, DrainerResult};
use crate::models::UserId;
use crate::services::{CreditSimulator, LocalScheduler, PaymentScheduler};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum CreditCommands {
    /// Show the credit score snapshot and suggested actions
    Show,
    /// Project the score after taking some of the suggested actions
    Simulate {
        /// Action numbers as listed by `credit show`
        actions: Vec<usize>,
        /// Take every action
        #[arg(long, conflicts_with = "actions")]
        all: bool,
    },
}

pub fn handle_credit_command(
    storage: &Storage,
    settings: &Settings,
    viewer: &UserId,
    cmd: CreditCommands,
) -> DrainerResult<()> {
    let simulator = CreditSimulator::new(&settings.credit);

    match cmd {
        CreditCommands::Show => {
            let subscribed = LocalScheduler::new(storage, settings).is_subscribed(viewer)?;
            print!("{}", format_credit_score(&settings.credit, subscribed));
        }

        CreditCommands::Simulate { actions, all } => {
            let simulation = if all {
                simulator.best_case()
            } else {
                if actions.is_empty() {
                    return Err(DrainerError::Validation(
                        "Pick at least one action number, or pass --all".into(),
                    ));
                }
                // Listed from 1
                let indexes = actions
                    .iter()
                    .map(|&n| {
                        n.checked_sub(1).ok_or_else(|| {
                            DrainerError::Validation("Action numbers start at 1".into())
                        })
                    })
                    .collect::<DrainerResult<Vec<_>>>()?;
                simulator.simulate(&indexes)?
            };
            print!("{}", format_simulation(&simulation));
        }
    }

    Ok(())
}
