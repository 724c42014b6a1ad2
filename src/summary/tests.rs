#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn expense(amount: Decimal, category: &str, date: &str) -> Expense {
    Expense::new(amount, category.into(), date.into())
}

fn sample() -> Vec<Expense> {
    vec![
        expense(dec!(25), "Food", "2024-01-01"),
        expense(dec!(75), "Food", "2024-01-02"),
        expense(dec!(10), "Transport", "2024-01-03"),
    ]
}

// ── total ─────────────────────────────────────────────────────

#[test]
fn test_total_empty() {
    assert_eq!(total(&[]), Decimal::ZERO);
}

#[test]
fn test_total_single() {
    let expenses = vec![expense(dec!(50.00), "Food", "2024-01-15")];
    assert_eq!(total(&expenses), dec!(50.00));
}

#[test]
fn test_total_sample() {
    assert_eq!(total(&sample()), dec!(110));
}

#[test]
fn test_total_is_exact_for_cents() {
    let expenses = vec![
        expense(dec!(0.1), "Food", "2024-01-01"),
        expense(dec!(0.2), "Food", "2024-01-01"),
    ];
    assert_eq!(total(&expenses), dec!(0.3));
}

// ── totals_by_category ────────────────────────────────────────

#[test]
fn test_totals_by_category_empty() {
    assert!(totals_by_category(&[]).is_empty());
}

#[test]
fn test_totals_by_category_sample() {
    let totals = totals_by_category(&sample());
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["Food"], dec!(100));
    assert_eq!(totals["Transport"], dec!(10));
    assert!(!totals.contains_key("Bills"));
}

#[test]
fn test_category_totals_sum_to_total() {
    let expenses = vec![
        expense(dec!(12.34), "Food", "2024-01-01"),
        expense(dec!(5.66), "Bills", "2024-01-02"),
        expense(dec!(100), "Shopping", "2024-01-03"),
        expense(dec!(0.01), "Food", "2024-01-04"),
        expense(dec!(-3), "Other", "2024-01-05"),
    ];
    let sum: Decimal = totals_by_category(&expenses).values().copied().sum();
    assert_eq!(sum, total(&expenses));
}

#[test]
fn test_categories_are_case_sensitive() {
    let expenses = vec![
        expense(dec!(1), "food", "2024-01-01"),
        expense(dec!(2), "Food", "2024-01-01"),
    ];
    assert_eq!(totals_by_category(&expenses).len(), 2);
}

// ── breakdown ─────────────────────────────────────────────────

#[test]
fn test_breakdown_empty() {
    assert!(breakdown(&[]).is_empty());
}

#[test]
fn test_breakdown_sorted_largest_first() {
    let shares = breakdown(&sample());
    let names: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Transport"]);
    assert_eq!(shares[0].amount, dec!(100));
}

#[test]
fn test_breakdown_ties_by_name() {
    let expenses = vec![
        expense(dec!(5), "Transport", "2024-01-01"),
        expense(dec!(5), "Bills", "2024-01-01"),
    ];
    let names: Vec<String> = breakdown(&expenses).into_iter().map(|s| s.category).collect();
    assert_eq!(names, vec!["Bills", "Transport"]);
}

#[test]
fn test_breakdown_shares() {
    let expenses = vec![
        expense(dec!(30), "Food", "2024-01-01"),
        expense(dec!(10), "Bills", "2024-01-01"),
    ];
    let shares = breakdown(&expenses);
    assert_eq!(shares[0].share, dec!(75));
    assert_eq!(shares[1].share, dec!(25));
}

#[test]
fn test_breakdown_shares_sum_to_hundred() {
    let sum: Decimal = breakdown(&sample()).iter().map(|s| s.share).sum();
    assert!((sum - dec!(100)).abs() < dec!(0.0001));
}

#[test]
fn test_breakdown_zero_total() {
    let expenses = vec![expense(Decimal::ZERO, "Food", "2024-01-01")];
    let shares = breakdown(&expenses);
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].share, Decimal::ZERO);
}

// ── Overflow ──────────────────────────────────────────────────

fn huge() -> Decimal {
    Decimal::from_str_exact("70000000000000000000000000000").unwrap()
}

#[test]
fn test_total_saturates_instead_of_overflowing() {
    let expenses = vec![
        expense(huge(), "Food", "2024-01-01"),
        expense(huge(), "Food", "2024-01-02"),
    ];
    assert_eq!(total(&expenses), Decimal::MAX);
    assert_eq!(totals_by_category(&expenses)["Food"], Decimal::MAX);
}

#[test]
fn test_total_saturates_negative() {
    let expenses = vec![
        expense(-huge(), "Refund", "2024-01-01"),
        expense(-huge(), "Refund", "2024-01-02"),
    ];
    assert_eq!(total(&expenses), Decimal::MIN);
}

#[test]
fn test_breakdown_with_huge_amounts() {
    let expenses = vec![
        expense(huge(), "Food", "2024-01-01"),
        expense(huge(), "Bills", "2024-01-02"),
        expense(dec!(1), "Transport", "2024-01-03"),
    ];
    let shares = breakdown(&expenses);
    assert_eq!(shares.len(), 3);
    assert_eq!(shares[0].category, "Bills");
    assert!(shares.iter().all(|s| s.share <= dec!(100)));
}

#[test]
fn test_breakdown_opposite_signs_cancelling() {
    let expenses = vec![
        expense(dec!(10), "Food", "2024-01-01"),
        expense(dec!(-10), "Refund", "2024-01-02"),
    ];
    let shares = breakdown(&expenses);
    assert!(shares.iter().all(|s| s.share.is_zero()));
}
