//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_amount, format_balance, format_expense_sheet};
use crate::error::{TrackerError, TrackerResult};
use crate::models::ExpensePatch;
use crate::services::{CreateExpenseInput, ExpenseService};
use crate::storage::Storage;

use super::parse_date;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List a month's expenses with totals
    List {
        /// Month label (e.g. "Octubre 2024")
        #[arg(short, long)]
        month: String,
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add an expense
    Add {
        /// What the expense is for
        concept: String,
        /// Amount in whole currency units
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(short, long)]
        month: String,
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Mark as already paid
        #[arg(long)]
        paid: bool,
    },

    /// Flip an expense between paid and pending
    Toggle {
        /// Position shown by `list`, or expense ID
        expense: String,
        #[arg(short, long)]
        month: String,
        /// Category filter the position refers to
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit an expense
    Edit {
        /// Position shown by `list`, or expense ID
        expense: String,
        #[arg(short, long)]
        month: String,
        /// Category filter the position refers to
        #[arg(short, long)]
        category: Option<String>,
        /// New concept
        #[arg(long)]
        concept: Option<String>,
        /// New amount
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Position shown by `list`, or expense ID
        expense: String,
        #[arg(short, long)]
        month: String,
        /// Category filter the position refers to
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show paid, pending and total amounts
    Balance {
        #[arg(short, long)]
        month: String,
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage, settings);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List { month, category } => {
            let scope = service.scope(&month, category.as_deref())?;
            print!("{}", format_expense_sheet(&service.list(scope), currency));
        }

        ExpenseCommands::Add {
            concept,
            amount,
            month,
            category,
            date,
            paid,
        } => {
            let expense = service.add(CreateExpenseInput {
                month,
                concept,
                amount: parse_amount(&amount)?,
                category,
                date: date.as_deref().map(parse_date).transpose()?,
                paid,
            })?;

            println!(
                "Added expense: {} ({})",
                expense.concept,
                format_amount(expense.amount, currency)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Toggle {
            expense,
            month,
            category,
        } => {
            let scope = service.scope(&month, category.as_deref())?;
            let toggled = service.toggle_paid(scope, &expense)?;
            let state = if toggled.paid { "paid" } else { "pending" };
            println!("Marked '{}' as {}", toggled.concept, state);
        }

        ExpenseCommands::Edit {
            expense,
            month,
            category,
            concept,
            amount,
            date,
        } => {
            let patch = ExpensePatch {
                concept,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            let scope = service.scope(&month, category.as_deref())?;
            let updated = service.edit(scope, &expense, &patch)?;
            println!(
                "Updated expense: {} ({})",
                updated.concept,
                format_amount(updated.amount, currency)
            );
        }

        ExpenseCommands::Delete {
            expense,
            month,
            category,
        } => {
            let scope = service.scope(&month, category.as_deref())?;
            let removed = service.delete(scope, &expense)?;
            println!("Deleted expense: {}", removed.concept);
        }

        ExpenseCommands::Balance { month, category } => {
            let scope = service.scope(&month, category.as_deref())?;
            println!("Balance: {}", scope);
            print!("{}", format_balance(&service.balance(scope), currency));
        }
    }

    Ok(())
}

/// Parse an amount argument as whole currency units
fn parse_amount(input: &str) -> TrackerResult<u64> {
    input.trim().parse::<u64>().map_err(|_| {
        TrackerError::Validation(format!(
            "Invalid amount '{}': use a non-negative whole number",
            input.trim()
        ))
    })
}
