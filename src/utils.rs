//! Utility functions for the circuit standings crate

use chrono::{Datelike, NaiveDate};

/// Month and year of a round, e.g. "April 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Compact year/month form used in tables, e.g. "2024-04"
pub fn short_month_label(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// Pad or truncate a cell to a fixed display width (character based)
pub fn fit_cell(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count >= width {
        value.chars().take(width).collect()
    } else {
        format!("{}{}", value, " ".repeat(width - count))
    }
}
