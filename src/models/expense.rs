use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Format used for the `date` field, both on disk and in the UI.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Categories offered by the form. Any other label is accepted as well.
pub(crate) const SUGGESTED_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Entertainment",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Expense {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
}

impl Expense {
    pub(crate) fn new(amount: Decimal, category: String, date: String) -> Self {
        Self {
            amount,
            category,
            date,
        }
    }

    /// Build a record from raw form input, reporting every field that is invalid.
    pub(crate) fn parse(amount: &str, category: &str, date: &str) -> Result<Self, InvalidFields> {
        let mut errors = Vec::new();

        let parsed_amount = if amount.trim().is_empty() {
            errors.push(FieldError::new(Field::Amount, "is required"));
            None
        } else {
            let parsed = parse_amount(amount);
            if parsed.is_none() {
                errors.push(FieldError::new(Field::Amount, "must be a number"));
            }
            parsed
        };

        let category = category.trim();
        if category.is_empty() {
            errors.push(FieldError::new(Field::Category, "is required"));
        }

        let date = date.trim();
        let parsed_date = if date.is_empty() {
            errors.push(FieldError::new(Field::Date, "is required"));
            None
        } else {
            let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok();
            if parsed.is_none() {
                errors.push(FieldError::new(Field::Date, "must be a date like 2024-01-31"));
            }
            parsed
        };

        match (parsed_amount, parsed_date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(Self::new(
                amount,
                category.to_string(),
                date.format(DATE_FORMAT).to_string(),
            )),
            _ => Err(InvalidFields(errors)),
        }
    }
}

/// Parse a user-typed amount. Accepts plain decimals and scientific notation.
pub(crate) fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Today's local date in [`DATE_FORMAT`].
pub(crate) fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Amount,
    Category,
    Date,
}

impl Field {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldError {
    pub(crate) field: Field,
    pub(crate) reason: &'static str,
}

impl FieldError {
    fn new(field: Field, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InvalidFields(pub(crate) Vec<FieldError>);

impl InvalidFields {
    #[cfg(test)]
    pub(crate) fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub(crate) fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for InvalidFields {}
