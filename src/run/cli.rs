use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use crate::models;
use crate::settings::Settings;
use crate::store::Store;
use crate::summary;
use crate::ui::util::{bar_width, format_amount, format_share, truncate};

const STATS_BAR_WIDTH: usize = 30;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Record a new expense
    Add {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        category: String,
        /// YYYY-MM-DD, defaults to today
        date: Option<String>,
    },
    /// Replace the expense shown as #INDEX in `list`
    Edit {
        index: usize,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        category: String,
        date: String,
    },
    /// Delete the expense shown as #INDEX in `list`
    Delete { index: usize },
    /// Delete every expense
    Clear {
        /// Confirm that all expenses should be removed
        #[arg(long)]
        yes: bool,
    },
    /// Show all expenses and the total spent
    #[command(alias = "ls")]
    List,
    /// Print the total spent
    Total,
    /// Show spending by category
    #[command(alias = "s")]
    Stats,
    /// Export all expenses to a CSV file
    Export { path: PathBuf },
}

pub(crate) fn as_cli(command: Command, store: &mut Store, settings: &Settings) -> Result<()> {
    match command {
        Command::Add {
            amount,
            category,
            date,
        } => cli_add(store, settings, &amount, &category, date),
        Command::Edit {
            index,
            amount,
            category,
            date,
        } => cli_edit(store, settings, index, &amount, &category, &date),
        Command::Delete { index } => cli_delete(store, settings, index),
        Command::Clear { yes } => cli_clear(store, yes),
        Command::List => cli_list(store, settings),
        Command::Total => {
            let total = summary::total(store.expenses());
            println!("Total Spent: {}", format_amount(total, &settings.currency));
            Ok(())
        }
        Command::Stats => cli_stats(store, settings),
        Command::Export { path } => cli_export(store, &path),
    }
}

/// Convert a 1-based list number to a store position.
fn to_position(index: usize) -> Result<usize> {
    index
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("Expense numbers start at 1"))
}

fn cli_add(
    store: &mut Store,
    settings: &Settings,
    amount: &str,
    category: &str,
    date: Option<String>,
) -> Result<()> {
    let date = date.unwrap_or_else(models::today);
    let position = store.add(amount, category, &date)?;
    if let Some(expense) = store.get(position) {
        println!(
            "Added #{}: {} {} on {}",
            position + 1,
            expense.category,
            format_amount(expense.amount, &settings.currency),
            expense.date
        );
    }
    Ok(())
}

fn cli_edit(
    store: &mut Store,
    settings: &Settings,
    index: usize,
    amount: &str,
    category: &str,
    date: &str,
) -> Result<()> {
    let position = to_position(index)?;
    store.update(position, amount, category, date)?;
    if let Some(expense) = store.get(position) {
        println!(
            "Updated #{index}: {} {} on {}",
            expense.category,
            format_amount(expense.amount, &settings.currency),
            expense.date
        );
    }
    Ok(())
}

fn cli_delete(store: &mut Store, settings: &Settings, index: usize) -> Result<()> {
    let position = to_position(index)?;
    if let Some(removed) = store.delete(Some(position))? {
        println!(
            "Deleted #{index}: {} {} on {}",
            removed.category,
            format_amount(removed.amount, &settings.currency),
            removed.date
        );
    }
    Ok(())
}

fn cli_clear(store: &mut Store, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!(
            "Refusing to delete {} expenses without --yes",
            store.len()
        );
    }
    let count = store.len();
    store.clear()?;
    println!("Cleared {count} expenses");
    Ok(())
}

fn cli_list(store: &Store, settings: &Settings) -> Result<()> {
    if store.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!("{:<5} {:<20} {:>14}  Date", "#", "Category", "Amount");
    println!("{}", "─".repeat(55));
    for (i, expense) in store.expenses().iter().enumerate() {
        println!(
            "{:<5} {:<20} {:>14}  {}",
            i + 1,
            truncate(&expense.category, 20),
            format_amount(expense.amount, &settings.currency),
            expense.date,
        );
    }
    println!("{}", "─".repeat(55));
    let total = summary::total(store.expenses());
    println!("Total Spent: {}", format_amount(total, &settings.currency));
    Ok(())
}

fn cli_stats(store: &Store, settings: &Settings) -> Result<()> {
    let breakdown = summary::breakdown(store.expenses());
    if breakdown.is_empty() {
        println!("No expenses to show statistics.");
        return Ok(());
    }

    println!("Expenses by Category");
    println!("{}", "─".repeat(40 + STATS_BAR_WIDTH));
    for entry in &breakdown {
        println!(
            "  {:<18} {:>14} {:>7}  {}",
            truncate(&entry.category, 18),
            format_amount(entry.amount, &settings.currency),
            format_share(entry.share),
            "█".repeat(bar_width(entry.share, STATS_BAR_WIDTH)),
        );
    }
    println!("{}", "─".repeat(40 + STATS_BAR_WIDTH));
    let total = summary::total(store.expenses());
    println!("  {:<18} {:>14}", "Total", format_amount(total, &settings.currency));
    Ok(())
}

fn cli_export(store: &Store, path: &std::path::Path) -> Result<()> {
    let count = crate::export::export_csv(store.expenses(), path)
        .with_context(|| format!("Export to {} failed", path.display()))?;
    if count == 0 {
        println!("No expenses to export (wrote header only to {})", path.display());
    } else {
        println!("Exported {count} expenses to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
