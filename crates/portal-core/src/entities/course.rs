use serde::{Deserialize, Serialize};

use super::string_or_number;

/// An enrolled course, keyed by `(term, class_number)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseEntry {
    #[serde(rename = "STRM")]
    pub term: String,
    #[serde(rename = "CLASS_NBR", deserialize_with = "string_or_number")]
    pub class_number: String,
    #[serde(rename = "CRSE_CODE")]
    pub course_code: String,
    #[serde(rename = "COURSE_TITLE_LONG", default)]
    pub course_title: String,
    #[serde(rename = "SSR_COMPONENT", default)]
    pub component: Option<String>,
    #[serde(rename = "CLASS_SECTION", default)]
    pub class_section: Option<String>,
}
