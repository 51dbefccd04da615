//! Budget CLI commands

use clap::Subcommand;

use crate::error::DrainerResult;
use crate::models::Money;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_money;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Add a budget category
    Add {
        /// Category name
        name: String,
        /// Planned monthly amount
        planned: String,
        /// Amount spent so far
        #[arg(short, long, default_value = "0")]
        actual: String,
        /// Display color, e.g. "#10B981"
        #[arg(long)]
        color: Option<String>,
    },
    /// Replace the planned and/or actual amount
    Set {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        planned: Option<String>,
        #[arg(short, long)]
        actual: Option<String>,
    },
    /// Show planned vs actual for every category
    List,
    /// Delete a budget category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> DrainerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add {
            name,
            planned,
            actual,
            color,
        } => {
            let category = service.create(
                &name,
                parse_money(&planned, "planned amount")?,
                parse_money(&actual, "actual amount")?,
                color.as_deref(),
            )?;
            println!("Added budget category: {}", category.name);
            println!("  Planned: {}", category.planned);
            println!("  ID: {}", category.id);
        }

        BudgetCommands::Set {
            category,
            planned,
            actual,
        } => {
            if planned.is_none() && actual.is_none() {
                println!("No changes specified. Use --planned and/or --actual.");
                return Ok(());
            }

            let found = service.require(&category)?;
            let parse = |v: Option<String>, field: &str| -> DrainerResult<Option<Money>> {
                v.map(|s| parse_money(&s, field)).transpose()
            };
            let updated = service.replace(
                found.id,
                parse(planned, "planned amount")?,
                parse(actual, "actual amount")?,
            )?;

            println!("Updated {}: {} of {}", updated.name, updated.actual, updated.planned);
            if updated.is_over_budget() {
                println!("  Over budget by {}", updated.remaining().abs());
            }
        }

        BudgetCommands::List => {
            let totals = service.totals()?;
            if totals.categories.is_empty() {
                println!("No budget categories found.");
            } else {
                print!("{}", totals.format_terminal());
            }
        }

        BudgetCommands::Delete { category } => {
            let found = service.require(&category)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted budget category: {}", deleted.name);
        }
    }

    Ok(())
}
