#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // Japanese characters are multi-byte UTF-8
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_mixed_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_no_commas() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_pads_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

#[test]
fn test_format_amount_negative() {
    // Stored amounts are always positive; totals passed through here
    // should still render a sign if one ever appears.
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent_rounds_to_one_decimal() {
    assert_eq!(format_percent(dec!(87.8787878)), "87.9%");
    assert_eq!(format_percent(dec!(12.1212121)), "12.1%");
}

#[test]
fn test_format_percent_whole_number() {
    assert_eq!(format_percent(dec!(100)), "100.0%");
}

#[test]
fn test_format_percent_zero() {
    assert_eq!(format_percent(dec!(0)), "0.0%");
}

// ── format_timestamp ──────────────────────────────────────────

#[test]
fn test_format_timestamp_rfc3339() {
    assert_eq!(
        format_timestamp("2024-01-15T09:30:12.123456+00:00"),
        "2024-01-15 09:30"
    );
}

#[test]
fn test_format_timestamp_short_input_unchanged() {
    assert_eq!(format_timestamp("2024-01-15"), "2024-01-15");
    assert_eq!(format_timestamp(""), "");
}
