mod expense;

pub(crate) use expense::{
    parse_amount, today, Expense, Field, InvalidFields, DATE_FORMAT, SUGGESTED_CATEGORIES,
};
