use serde::{Deserialize, Serialize};

/// A date shared by schedule, exam, and finance records.
///
/// Keyed by the date string itself and always upserted, so the same day
/// referenced by several resources is stored once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    #[serde(
        rename = "DATE",
        alias = "START_DT",
        alias = "ExamDate",
        alias = "DUE_DT"
    )]
    pub date: String,
}
