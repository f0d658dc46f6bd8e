use serde::{Deserialize, Serialize};

use super::string_or_number;

/// A recurring class meeting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Meeting date; also the key of the linked [`super::CalendarDate`].
    #[serde(rename = "START_DT")]
    pub start_date: String,
    #[serde(rename = "MEETING_TIME_START", default)]
    pub start_time: String,
    #[serde(rename = "MEETING_TIME_END", default)]
    pub end_time: String,
    #[serde(rename = "CRSE_CODE")]
    pub course_code: String,
    #[serde(rename = "COURSE_TITLE_LONG", default)]
    pub course_title: String,
    #[serde(rename = "CLASS_SECTION", default)]
    pub class_section: String,
    /// Lecture, lab, tutorial, ...
    #[serde(rename = "SSR_COMPONENT", default)]
    pub component: String,
    #[serde(rename = "ROOM", default)]
    pub room: Option<String>,
    #[serde(rename = "LOCATION", default)]
    pub location: Option<String>,
    #[serde(rename = "N_DELIVERY_MODE", default)]
    pub delivery_mode: Option<String>,
    #[serde(rename = "WEEK_SESSION", default, deserialize_with = "string_or_number")]
    pub week_session: String,
}
