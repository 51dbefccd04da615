use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};

use debt_drainer::audit::EntityType;
use debt_drainer::cli::{
    handle_budget_command, handle_credit_command, handle_debt_command, handle_expense_command,
    handle_pay_command, resolve_viewer,
};
use debt_drainer::config::{DrainerPaths, Settings};
use debt_drainer::models::UserId;
use debt_drainer::reports::{BudgetTotals, DashboardTotals, DebtSummary};
use debt_drainer::services::due_date::{due_schedule, DueStatus};
use debt_drainer::storage::Storage;

#[derive(Parser)]
#[command(
    name = "drainer",
    version,
    about = "Split shared expenses and drain debts a little every day",
    long_about = "Debt Drainer tracks shared expenses (who paid, who owes), settles \
                  shares one at a time or all at once, and plans small daily \
                  micropayments toward your debts."
)]
struct Cli {
    /// Act as this user instead of the configured one
    #[arg(long = "as", global = true, value_name = "USER", env = "DEBT_DRAINER_USER")]
    as_user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Shared expense commands
    #[command(subcommand, alias = "exp")]
    Expense(debt_drainer::cli::ExpenseCommands),

    /// Debt commands
    #[command(subcommand)]
    Debt(debt_drainer::cli::DebtCommands),

    /// Budget category commands
    #[command(subcommand)]
    Budget(debt_drainer::cli::BudgetCommands),

    /// Credit score commands
    #[command(subcommand)]
    Credit(debt_drainer::cli::CreditCommands),

    /// Micropayment commands
    #[command(subcommand)]
    Pay(debt_drainer::cli::PayCommands),

    /// Owed, owing, budget and debts at a glance
    Dashboard,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Only entries for this expense, debt, category or payment ID
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config {
        /// Your user id
        #[arg(long)]
        user: Option<String>,
        /// Your display name
        #[arg(long)]
        name: Option<String>,
        /// Days ahead that count as "due soon"
        #[arg(long)]
        due_soon_days: Option<u32>,
        /// Credit bureau reporting add-on
        #[arg(long)]
        subscribed: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DrainerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let viewer = resolve_viewer(&settings, cli.as_user.as_deref());

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &viewer, cmd)?;
        }
        Some(Commands::Debt(cmd)) => {
            handle_debt_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, cmd)?;
        }
        Some(Commands::Credit(cmd)) => {
            handle_credit_command(&storage, &settings, &viewer, cmd)?;
        }
        Some(Commands::Pay(cmd)) => {
            handle_pay_command(&storage, &settings, &viewer, cmd)?;
        }
        Some(Commands::Dashboard) => print_dashboard(&storage, &settings, &viewer)?,
        Some(Commands::Audit { limit, entity }) => {
            let entries = match entity {
                Some(id) => {
                    let mut entries = storage.audit().read_for_entity(&id)?;
                    let start = entries.len().saturating_sub(limit);
                    entries.split_off(start)
                }
                None => storage.audit().read_recent(limit)?,
            };
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            println!("Initializing Debt Drainer at: {}", paths.base_dir().display());
            debt_drainer::storage::initialize_storage(&paths, &settings)?;
            println!("Initialization complete!");
            println!();
            println!("Starter budget categories have been created:");
            println!("  Housing, Food, Transportation, Entertainment, Utilities, Debt Payments");
            println!();
            println!("Run 'drainer config --user <id> --name <name>' to set who you are.");
        }
        Some(Commands::Config {
            user,
            name,
            due_soon_days,
            subscribed,
        }) => {
            let before = settings.clone();
            if let Some(user) = user {
                settings.current_user_id = UserId::from(user);
            }
            if let Some(name) = name {
                settings.current_user_name = name;
            }
            if let Some(days) = due_soon_days {
                settings.due_soon_days = days;
            }
            if let Some(subscribed) = subscribed {
                settings.subscribed = subscribed;
            }
            let changed = serde_json::to_value(&before)? != serde_json::to_value(&settings)?;
            if changed {
                settings.save(&paths)?;
                storage.log_update(EntityType::Settings, "settings", None, &before, &settings)?;
                println!("Settings saved.");
                println!();
            }

            println!("Debt Drainer Configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Current user:  {} ({})",
                settings.current_user_id, settings.current_user_name
            );
            println!("  Due soon:      {} days", settings.due_soon_days);
            println!(
                "  Bureau reporting: {}",
                if settings.subscribed { "subscribed" } else { "not subscribed" }
            );
        }
        None => {
            println!("Debt Drainer - shared expenses and daily debt micropayments");
            println!();
            println!("Run 'drainer --help' for usage information.");
            println!("Run 'drainer dashboard' for an overview.");
        }
    }

    Ok(())
}

fn print_dashboard(storage: &Storage, settings: &Settings, viewer: &UserId) -> Result<()> {
    print!("{}", DashboardTotals::generate(storage, viewer)?.format_terminal(viewer));

    let budget = BudgetTotals::compute(&storage.budget.get_all()?);
    if !budget.categories.is_empty() {
        println!();
        println!(
            "Budget: {} of {} spent ({}% used)",
            budget.actual,
            budget.planned,
            budget.percent_used()
        );
        if budget.is_over_budget() {
            println!("  Over budget by {}", budget.difference.abs());
        }
    }

    let debts = storage.debts.get_all()?;
    if !debts.is_empty() {
        println!();
        print!("{}", DebtSummary::compute(&debts)?.format_terminal());

        let today = chrono::Local::now().date_naive();
        let attention: Vec<_> = due_schedule(
            &debts,
            today.year(),
            today.month(),
            today,
            settings.due_soon_days,
        )?
        .into_iter()
        .filter(|item| matches!(item.status, DueStatus::DueToday | DueStatus::DueSoon))
        .collect();

        for item in attention {
            println!(
                "  {} {} due {} [{}]",
                item.name,
                item.min_payment,
                item.due_date.format(&settings.date_format),
                item.status
            );
        }
    }

    Ok(())
}
