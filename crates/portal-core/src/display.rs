//! Display helpers for values the sync engine produces.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Shown instead of a zero total.
pub const NO_UNPAID_BILL: &str = "No unpaid bill";

/// Render an outstanding finance total, e.g. `"Rp. 7,500,000"`.
///
/// Whole amounts drop the fraction; anything else keeps two decimals.
#[must_use]
pub fn format_charge_total(total: f64, prefix: &str) -> String {
    let cents = (total * 100.0).round();
    if cents == 0.0 {
        return NO_UNPAID_BILL.to_string();
    }

    let negative = cents < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents.abs() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;

    let sign = if negative { "-" } else { "" };
    if frac == 0 {
        format!("{prefix} {sign}{whole}")
    } else {
        format!("{prefix} {sign}{whole}.{frac:02}")
    }
}

/// Whether `pattern` is a `strftime` pattern chrono can render.
#[must_use]
pub fn is_valid_date_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Render the last successful sync time with a `strftime` pattern.
///
/// Falls back to RFC 3339 when the pattern cannot be rendered.
#[must_use]
pub fn format_last_updated(at: &DateTime<Utc>, pattern: &str) -> String {
    if !is_valid_date_format(pattern) {
        return at.to_rfc3339();
    }
    let mut out = String::new();
    match write!(out, "{}", at.format(pattern)) {
        Ok(()) => out,
        Err(_) => at.to_rfc3339(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
