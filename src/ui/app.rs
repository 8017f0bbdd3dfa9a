use rust_decimal::Decimal;

use crate::analysis::{self, CategorySummary};
use crate::db::Database;
use crate::error::Error;
use crate::models::Expense;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Entry,
    Records,
    Analysis,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Entry, Self::Records, Self::Analysis]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry => write!(f, "Entry"),
            Self::Records => write!(f, "Records"),
            Self::Analysis => write!(f, "Analysis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    #[default]
    Title,
    Amount,
    Category,
    Memo,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Title, Self::Amount, Self::Category, Self::Memo]
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Memo => "Memo",
        }
    }

    pub(crate) fn next(self) -> FormField {
        match self {
            Self::Title => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Memo,
            Self::Memo => Self::Title,
        }
    }

    pub(crate) fn prev(self) -> FormField {
        match self {
            Self::Title => Self::Memo,
            Self::Amount => Self::Title,
            Self::Category => Self::Amount,
            Self::Memo => Self::Category,
        }
    }
}

/// Text buffers behind the entry form. Contents are kept verbatim; parsing
/// and validation happen only on submit.
#[derive(Debug, Default, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) title: String,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) memo: String,
    pub(crate) focus: FormField,
}

impl ExpenseForm {
    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Amount => &self.amount,
            FormField::Category => &self.category,
            FormField::Memo => &self.memo,
        }
    }

    /// Buffer of the focused field.
    pub(crate) fn value_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Amount => &mut self.amount,
            FormField::Category => &mut self.category,
            FormField::Memo => &mut self.memo,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.title.clear();
        self.amount.clear();
        self.category.clear();
        self.memo.clear();
        self.focus = FormField::Title;
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Entry form
    pub(crate) form: ExpenseForm,

    // Records
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) expense_count: i64,

    // Analysis
    pub(crate) total: Decimal,
    pub(crate) summaries: Vec<CategorySummary>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Entry,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            form: ExpenseForm::default(),

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            expense_count: 0,

            total: Decimal::ZERO,
            summaries: Vec::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_records(&mut self, db: &Database) -> Result<(), Error> {
        self.expenses = db.all_expenses()?;
        self.expense_count = db.expense_count()?;
        if self.expense_index >= self.expenses.len() && !self.expenses.is_empty() {
            self.expense_index = self.expenses.len() - 1;
        }
        Ok(())
    }

    /// Re-reads the full record set and recomputes the aggregates. Nothing
    /// is cached between analysis requests.
    pub(crate) fn refresh_analysis(&mut self, db: &Database) -> Result<(), Error> {
        let expenses = db.all_expenses()?;
        self.total = analysis::total(&expenses);
        self.summaries = analysis::category_summaries(&expenses);
        self.expense_count = db.expense_count()?;
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<(), Error> {
        self.refresh_records(db)?;
        self.refresh_analysis(db)?;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
