use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Expense;

const HEADERS: [&str; 4] = ["#", "Date", "Category", "Amount"];

/// Write every expense to a CSV file, numbered the way the list shows them.
/// Returns the number of rows written, excluding the header.
pub(crate) fn export_csv(expenses: &[Expense], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record(HEADERS)
        .context("Failed to write CSV header")?;
    for (i, expense) in expenses.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            expense.date.clone(),
            expense.category.clone(),
            format!("{:.2}", expense.amount),
        ])
        .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV file")?;

    tracing::info!(path = %path.display(), count = expenses.len(), "exported expenses");
    Ok(expenses.len())
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
