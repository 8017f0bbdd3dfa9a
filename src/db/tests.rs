#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::NewExpense;
use rusqlite::params;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn make_expense(title: &str, amount: Decimal, category: &str) -> NewExpense {
    NewExpense {
        title: title.into(),
        amount,
        category: category.into(),
        memo: String::new(),
    }
}

// ── Insert & read back ────────────────────────────────────────

#[test]
fn test_insert_returns_id() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&make_expense("Coffee", dec!(4.50), "Food"))
        .unwrap();
    assert!(id > 0);
}

#[test]
fn test_insert_then_list_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let input = NewExpense {
        title: "Coffee".into(),
        amount: dec!(4.50),
        category: "Food".into(),
        memo: "morning latte".into(),
    };
    let id = db.insert_expense(&input).unwrap();

    let all = db.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    let e = &all[0];
    assert_eq!(e.id, Some(id));
    assert_eq!(e.title, "Coffee");
    assert_eq!(e.amount, dec!(4.50));
    assert_eq!(e.category, "Food");
    assert_eq!(e.memo, "morning latte");
    assert!(!e.created_at.is_empty());
}

#[test]
fn test_ids_distinct_and_monotonic() {
    let db = Database::open_in_memory().unwrap();
    let id1 = db
        .insert_expense(&make_expense("A", dec!(1.00), "Misc"))
        .unwrap();
    let id2 = db
        .insert_expense(&make_expense("B", dec!(2.00), "Misc"))
        .unwrap();
    let id3 = db
        .insert_expense(&make_expense("C", dec!(3.00), "Misc"))
        .unwrap();
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn test_empty_database_lists_nothing() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.all_expenses().unwrap().is_empty());
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_expense_count() {
    let db = Database::open_in_memory().unwrap();
    for i in 0..5 {
        db.insert_expense(&make_expense(&format!("Item {i}"), dec!(1.00), "Misc"))
            .unwrap();
    }
    assert_eq!(db.expense_count().unwrap(), 5);
}

// ── Validation at the boundary ────────────────────────────────

#[test]
fn test_insert_rejects_empty_title() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .insert_expense(&make_expense("", dec!(4.50), "Food"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_insert_rejects_empty_category() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .insert_expense(&make_expense("Coffee", dec!(4.50), ""))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_insert_rejects_zero_amount() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .insert_expense(&make_expense("Coffee", Decimal::ZERO, "Food"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_insert_rejects_negative_amount() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .insert_expense(&make_expense("Refund", dec!(-4.50), "Food"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_rejected_insert_leaves_storage_unchanged() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&make_expense("Coffee", dec!(4.50), "Food"))
        .unwrap();

    let before = db.expense_count().unwrap();
    let result = db.insert_expense(&make_expense("", dec!(0), ""));
    assert!(result.is_err());
    assert_eq!(db.expense_count().unwrap(), before);

    let all = db.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Coffee");
}

// ── Ordering ──────────────────────────────────────────────────

#[test]
fn test_listing_newest_first() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&make_expense("First", dec!(1.00), "Misc"))
        .unwrap();
    db.insert_expense(&make_expense("Second", dec!(2.00), "Misc"))
        .unwrap();
    db.insert_expense(&make_expense("Third", dec!(3.00), "Misc"))
        .unwrap();

    let titles: Vec<String> = db
        .all_expenses()
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[test]
fn test_listing_ordered_by_created_at() {
    let db = Database::open_in_memory().unwrap();
    // Inserted out of chronological order; created_at drives the sort
    for (title, created_at) in [
        ("Middle", "2024-01-15T00:00:00+00:00"),
        ("Newest", "2024-01-20T00:00:00+00:00"),
        ("Oldest", "2024-01-10T00:00:00+00:00"),
    ] {
        db.conn
            .execute(
                "INSERT INTO expenses (title, amount, category, memo, created_at)
                 VALUES (?1, '1.00', 'Misc', '', ?2)",
                params![title, created_at],
            )
            .unwrap();
    }

    let titles: Vec<String> = db
        .all_expenses()
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[test]
fn test_equal_timestamps_fall_back_to_id() {
    let db = Database::open_in_memory().unwrap();
    for title in ["Earlier", "Later"] {
        db.conn
            .execute(
                "INSERT INTO expenses (title, amount, category, memo, created_at)
                 VALUES (?1, '1.00', 'Misc', '', '2024-01-15T00:00:00+00:00')",
                params![title],
            )
            .unwrap();
    }

    let titles: Vec<String> = db
        .all_expenses()
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Later", "Earlier"]);
}

// ── Exact-string fields ───────────────────────────────────────

#[test]
fn test_fields_stored_exactly_as_entered() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&make_expense("Coffee ", dec!(4.50), "food "))
        .unwrap();

    let all = db.all_expenses().unwrap();
    assert_eq!(all[0].title, "Coffee ");
    assert_eq!(all[0].category, "food ");
}

// ── Schema migration ──────────────────────────────────────────

#[test]
fn test_schema_version_set() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_double_migrate_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    // Running migrate again should not fail
    db.migrate().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.db");

    {
        let db = Database::open(&path).unwrap();
        db.insert_expense(&make_expense("Coffee", dec!(4.50), "Food"))
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let all = db.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Coffee");
}

// ── Decimal precision ─────────────────────────────────────────

#[test]
fn test_decimal_precision_preserved() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&make_expense("Precise", dec!(1234.5678), "Misc"))
        .unwrap();
    let all = db.all_expenses().unwrap();
    assert_eq!(all[0].amount, dec!(1234.5678));
}

#[test]
fn test_large_amounts() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&make_expense("House Deposit", dec!(350000.00), "Housing"))
        .unwrap();
    let all = db.all_expenses().unwrap();
    assert_eq!(all[0].amount, dec!(350000.00));
}

#[test]
fn test_corrupt_amount_surfaces_storage_error() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO expenses (title, amount, category, memo, created_at)
             VALUES ('Bad', 'not-a-number', 'Misc', '', '2024-01-15T00:00:00+00:00')",
            [],
        )
        .unwrap();

    let result = db.all_expenses();
    assert!(matches!(result, Err(Error::Storage(_))));
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_writes_all_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");

    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&make_expense("Coffee", dec!(4.50), "Food"))
        .unwrap();
    db.insert_expense(&make_expense("Bus", dec!(2.00), "Transport"))
        .unwrap();

    let count = db.export_to_csv(&path).unwrap();
    assert_eq!(count, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("id,title,amount,category,memo,created_at"));
    assert!(content.contains("Coffee"));
    assert!(content.contains("Bus"));
}

#[test]
fn test_export_empty_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");

    let db = Database::open_in_memory().unwrap();
    let count = db.export_to_csv(&path).unwrap();
    assert_eq!(count, 0);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("id,title,amount,category,memo,created_at"));
}
