//! Entity structs for every record the portal sync engine mirrors.
//!
//! Field names follow the portal's JSON payloads via `#[serde(rename)]`, so
//! the same structs decode responses and serialize for CLI output. Unknown
//! payload fields are ignored, which lets one array element decode both into
//! its primary record and into the [`CalendarDate`] it references.

mod calendar;
mod course;
mod exam;
mod finance;
mod grade;
mod schedule;
mod term;

pub use calendar::CalendarDate;
pub use course::CourseEntry;
pub use exam::ExamEntry;
pub use finance::FinanceCharge;
pub use grade::{GradeCourseEntry, GradeEntry};
pub use schedule::ScheduleEntry;
pub use term::Term;

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// JSON field that carries the term code on term-scoped records.
///
/// Term-scoped endpoints do not echo their term, so the decoder injects it
/// under this name before typed decoding.
pub const TERM_FIELD: &str = "STRM";

/// Accept a JSON string or number as a `String`. `null` becomes empty.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Accept a JSON number or a numeric string as `f64`.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("invalid amount '{s}': {e}"))),
        Value::Null => Ok(0.0),
        other => Err(de::Error::custom(format!("expected amount, got {other}"))),
    }
}
