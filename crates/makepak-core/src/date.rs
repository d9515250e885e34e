//! Month-count dates.
//!
//! Intro and retire dates are stored as `year * 12 + month - 1`, which fits
//! in a `u16` for every year the game can reach.

/// Default introduction date: January 1900.
pub const DEFAULT_INTRO_DATE: u16 = month_count(1900, 1);
/// Default retirement date: January 2999.
pub const DEFAULT_RETIRE_DATE: u16 = month_count(2999, 1);

/// Combine a year and a 1-based month into a month count.
pub const fn month_count(year: u16, month: u16) -> u16 {
    year * 12 + month - 1
}

/// Split a month count into year and 1-based month.
pub const fn split_month_count(count: u16) -> (u16, u16) {
    (count / 12, count % 12 + 1)
}

/// Render a month count as `YYYY/MM`.
pub fn format_month_count(count: u16) -> String {
    let (year, month) = split_month_count(count);
    format!("{year}/{month:02}")
}
