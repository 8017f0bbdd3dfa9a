use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::Expense;

/// One category's slice of the grand total. Derived on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategorySummary {
    pub(crate) category: String,
    pub(crate) subtotal: Decimal,
    pub(crate) percentage: Decimal,
}

/// Sum of all amounts. Zero for an empty slice.
pub(crate) fn total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Groups by exact category string (case and whitespace significant) and
/// computes each category's subtotal and share of the grand total.
/// Ordered by subtotal descending; equal subtotals fall back to category
/// label ascending.
pub(crate) fn category_summaries(expenses: &[Expense]) -> Vec<CategorySummary> {
    let grand_total = total(expenses);

    let mut subtotals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for expense in expenses {
        *subtotals.entry(expense.category.as_str()).or_default() += expense.amount;
    }

    let mut summaries: Vec<CategorySummary> = subtotals
        .into_iter()
        .map(|(category, subtotal)| {
            let percentage = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                subtotal / grand_total * Decimal::ONE_HUNDRED
            };
            CategorySummary {
                category: category.to_string(),
                subtotal,
                percentage,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.subtotal
            .cmp(&a.subtotal)
            .then_with(|| a.category.cmp(&b.category))
    });
    summaries
}
