use std::fmt;

/// The failures an expense operation can produce.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// User input violated one or more field constraints. Nothing was
    /// written; the operation can be retried with corrected input.
    #[error("{}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// The database could not be opened, read, or written.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// A single field constraint violated by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    EmptyTitle,
    EmptyCategory,
    NonPositiveAmount,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Violation::EmptyTitle => "Title is required",
            Violation::EmptyCategory => "Category is required",
            Violation::NonPositiveAmount => "Amount must be greater than zero",
        };
        write!(f, "{msg}")
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
