use serde::{Deserialize, Serialize};

use super::string_or_number;

/// One academic period, e.g. `1410` = 2014 odd semester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Term {
    /// Term code; the primary key and the suffix of fan-out URLs.
    #[serde(rename = "value", deserialize_with = "string_or_number")]
    pub code: String,
    /// Human label such as `"2014, Odd Semester"`.
    #[serde(rename = "field", default)]
    pub label: String,
}
