//! Read-only views derived from the current expense list.
//!
//! Everything here is recomputed from scratch on each call; callers refresh
//! after every store mutation. Sums saturate at `Decimal::MAX` / `Decimal::MIN`
//! instead of overflowing.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::Expense;

/// Sum of every amount. Zero for an empty list.
pub(crate) fn total(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

/// Amount spent per category. Categories with no records are absent.
pub(crate) fn totals_by_category(expenses: &[Expense]) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for expense in expenses {
        let sum = totals.entry(expense.category.clone()).or_default();
        *sum = sum.saturating_add(expense.amount);
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Percentage of the overall total, 0-100.
    pub(crate) share: Decimal,
}

/// Category totals ordered largest first (ties by name), with each
/// category's percentage of the overall total.
pub(crate) fn breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
    let overall = total(expenses);
    let mut shares: Vec<CategoryShare> = totals_by_category(expenses)
        .into_iter()
        .map(|(category, amount)| {
            let share = amount
                .checked_div(overall)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO);
            CategoryShare {
                category,
                amount,
                share,
            }
        })
        .collect();

    shares.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}

#[cfg(test)]
mod tests;
