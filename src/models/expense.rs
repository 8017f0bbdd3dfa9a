use rust_decimal::Decimal;

use crate::error::{Error, Violation};

/// A persisted expense record. `id` and `created_at` are assigned by the
/// store at insertion; records never change after that.
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: Option<i64>,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub memo: String,
    pub created_at: String,
}

/// Input for an expense that has not been persisted yet.
///
/// Field contents are taken exactly as entered: no trimming and no case
/// folding, so "Food" and "food " are distinct categories.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub memo: String,
}

impl NewExpense {
    /// Checks every field constraint and reports all violations at once.
    pub fn validate(&self) -> Result<(), Error> {
        let mut violations = Vec::new();
        if self.title.is_empty() {
            violations.push(Violation::EmptyTitle);
        }
        if self.amount <= Decimal::ZERO {
            violations.push(Violation::NonPositiveAmount);
        }
        if self.category.is_empty() {
            violations.push(Violation::EmptyCategory);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(violations))
        }
    }
}
