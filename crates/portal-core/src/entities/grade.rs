use serde::{Deserialize, Serialize};

use super::string_or_number;

/// One scored component (assignment, mid exam, final exam) of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeEntry {
    /// Term the record was fetched under. Injected, never sent by the portal.
    #[serde(rename = "STRM")]
    pub term: String,
    #[serde(rename = "kodemtk")]
    pub course_code: String,
    #[serde(rename = "course", default)]
    pub course: String,
    #[serde(rename = "lam", default)]
    pub component: Option<String>,
    #[serde(rename = "weight", default, deserialize_with = "string_or_number")]
    pub weight: String,
    #[serde(rename = "score", default, deserialize_with = "string_or_number")]
    pub score: String,
}

/// Course summary decoded from the same score array, keyed by
/// `(term, course_code)` so several components collapse into one row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GradeCourseEntry {
    #[serde(rename = "STRM")]
    pub term: String,
    #[serde(rename = "kodemtk")]
    pub course_code: String,
    #[serde(rename = "course", default)]
    pub course: String,
    #[serde(rename = "course_grade", default)]
    pub grade: Option<String>,
}
