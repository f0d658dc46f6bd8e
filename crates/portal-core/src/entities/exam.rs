use serde::{Deserialize, Serialize};

/// A scheduled exam.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExamEntry {
    #[serde(rename = "ExamDate")]
    pub exam_date: String,
    #[serde(rename = "ExamShift", default)]
    pub shift: Option<String>,
    #[serde(rename = "CRSE_CODE")]
    pub course_code: String,
    #[serde(rename = "COURSE_TITLE_LONG", default)]
    pub course_title: String,
    #[serde(rename = "ExamType", default)]
    pub exam_type: Option<String>,
    #[serde(rename = "ROOM", default)]
    pub room: Option<String>,
    #[serde(rename = "ChairNumber", default)]
    pub seat: Option<String>,
}
