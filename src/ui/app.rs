use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{self, Expense, SUGGESTED_CATEGORIES};
use crate::settings::Settings;
use crate::store::{Store, StoreError};
use crate::summary::{self, CategoryShare};
use crate::ui::util::format_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Statistics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Statistics]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Statistics => write!(f, "Statistics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { position: usize, label: String },
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Category,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Amount, Self::Category, Self::Date]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Amount => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Amount,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Date,
            Self::Category => Self::Amount,
            Self::Date => Self::Category,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount => write!(f, "Amount"),
            Self::Category => write!(f, "Category"),
            Self::Date => write!(f, "Date"),
        }
    }
}

/// Raw text of the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpenseForm {
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) date: String,
    pub(crate) focus: FormField,
    /// Position being edited; `None` means the form adds a new expense.
    pub(crate) editing: Option<usize>,
}

impl ExpenseForm {
    pub(crate) fn blank() -> Self {
        Self {
            amount: String::new(),
            category: String::new(),
            date: models::today(),
            focus: FormField::Amount,
            editing: None,
        }
    }

    pub(crate) fn for_edit(position: usize, expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            date: expense.date.clone(),
            focus: FormField::Amount,
            editing: Some(position),
        }
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.amount,
            FormField::Category => &self.category,
            FormField::Date => &self.date,
        }
    }

    pub(crate) fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Amount => &mut self.amount,
            FormField::Category => &mut self.category,
            FormField::Date => &mut self.date,
        }
    }

    /// Step through the suggested categories, starting from the current text.
    pub(crate) fn cycle_category(&mut self, delta: isize) {
        let len = SUGGESTED_CATEGORIES.len() as isize;
        let next = match SUGGESTED_CATEGORIES
            .iter()
            .position(|c| c.eq_ignore_ascii_case(self.category.trim()))
        {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.category = SUGGESTED_CATEGORIES[next as usize].to_string();
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,

    // Snapshot of the store, refreshed after every mutation
    pub(crate) expenses: Vec<Expense>,
    pub(crate) total: Decimal,
    pub(crate) breakdown: Vec<CategoryShare>,

    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    pub(crate) form: ExpenseForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: settings.currency.clone(),

            expenses: Vec::new(),
            total: Decimal::ZERO,
            breakdown: Vec::new(),

            expense_index: 0,
            expense_scroll: 0,

            form: ExpenseForm::blank(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn amount(&self, amount: Decimal) -> String {
        format_amount(amount, &self.currency)
    }

    /// Re-read the store and recompute totals.
    pub(crate) fn refresh(&mut self, store: &Store) {
        self.expenses = store.expenses().to_vec();
        self.total = summary::total(&self.expenses);
        self.breakdown = summary::breakdown(&self.expenses);

        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    /// Position under the cursor, if the list has any rows.
    pub(crate) fn selected_position(&self) -> Option<usize> {
        (self.expense_index < self.expenses.len()).then_some(self.expense_index)
    }

    pub(crate) fn select(&mut self, position: usize) {
        if position < self.expenses.len() {
            self.expense_index = position;
            let page = self.visible_rows.max(1);
            if position < self.expense_scroll {
                self.expense_scroll = position;
            } else if position >= self.expense_scroll + page {
                self.expense_scroll = position + 1 - page;
            }
        }
    }

    // ── Form ──────────────────────────────────────────────────

    pub(crate) fn begin_add(&mut self) {
        self.form = ExpenseForm::blank();
        self.input_mode = InputMode::Form;
    }

    /// Open the form on `position`, or on the cursor row when `None`.
    /// Does nothing when there is no such row.
    pub(crate) fn begin_edit(&mut self, position: Option<usize>) {
        let Some(position) = position.or_else(|| self.selected_position()) else {
            self.set_status("Nothing selected");
            return;
        };
        match self.expenses.get(position) {
            Some(expense) => {
                self.form = ExpenseForm::for_edit(position, expense);
                self.input_mode = InputMode::Form;
            }
            None => self.set_status(format!("No expense #{}", position + 1)),
        }
    }

    pub(crate) fn cancel_form(&mut self) {
        self.form = ExpenseForm::blank();
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    /// Save the form through the store. Invalid input keeps the form open.
    pub(crate) fn submit_form(&mut self, store: &mut Store) -> Result<()> {
        let form = self.form.clone();
        let result = match form.editing {
            Some(position) => store
                .update(position, &form.amount, &form.category, &form.date)
                .map(|()| position),
            None => store.add(&form.amount, &form.category, &form.date),
        };

        match result {
            Ok(position) => {
                self.refresh(store);
                self.select(position);
                self.form = ExpenseForm::blank();
                self.input_mode = InputMode::Normal;
                let verb = if form.editing.is_some() {
                    "Updated"
                } else {
                    "Added"
                };
                self.set_status(format!("{verb} #{}", position + 1));
            }
            Err(StoreError::Validation(invalid)) => {
                if let Some(first) = FormField::all()
                    .iter()
                    .find(|f| invalid.contains(form_to_model(**f)))
                {
                    self.form.focus = *first;
                }
                self.set_status(format!("Input error: {invalid}"));
            }
            Err(e) => {
                self.refresh(store);
                self.input_mode = InputMode::Normal;
                self.set_status(format!("Error: {e}"));
            }
        }
        Ok(())
    }

    // ── Confirmation ──────────────────────────────────────────

    pub(crate) fn request_delete(&mut self, position: Option<usize>) {
        let Some(position) = position.or_else(|| self.selected_position()) else {
            return;
        };
        let Some(expense) = self.expenses.get(position) else {
            self.set_status(format!("No expense #{}", position + 1));
            return;
        };
        let label = format!(
            "#{} {} {}",
            position + 1,
            expense.category,
            self.amount(expense.amount)
        );
        self.confirm_message = format!("Delete {label}?");
        self.pending_action = Some(PendingAction::DeleteExpense { position, label });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn request_clear(&mut self) {
        if self.expenses.is_empty() {
            self.set_status("No expenses to clear");
            return;
        }
        self.confirm_message = format!(
            "Are you sure you want to clear all {} expenses?",
            self.expenses.len()
        );
        self.pending_action = Some(PendingAction::ClearAll);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm(&mut self, store: &mut Store) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            let result = match &action {
                PendingAction::DeleteExpense { position, .. } => {
                    store.delete(Some(*position)).map(|_| ())
                }
                PendingAction::ClearAll => store.clear(),
            };
            self.refresh(store);
            match (result, action) {
                (Ok(()), PendingAction::DeleteExpense { label, .. }) => {
                    self.set_status(format!("Deleted {label}"))
                }
                (Ok(()), PendingAction::ClearAll) => {
                    self.expense_index = 0;
                    self.expense_scroll = 0;
                    self.set_status("All expenses cleared");
                }
                (Err(e), _) => self.set_status(format!("Error: {e}")),
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel_confirm(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }
}

fn form_to_model(field: FormField) -> models::Field {
    match field {
        FormField::Amount => models::Field::Amount,
        FormField::Category => models::Field::Category,
        FormField::Date => models::Field::Date,
    }
}
