//! Portal gateway configuration: base URL, endpoint paths, request limits.

use portal_core::SyncKind;
use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://newbinusmaya.binus.ac.id/services/ci/index.php/".to_string()
}

/// Default request timeout in seconds. Bounds a hung call so it cannot
/// stall the rest of the sync queue.
const fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("portal-sync/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Endpoint paths relative to [`GatewayConfig::base_url`].
///
/// `grades` and `course` are prefixes: the term code is appended per fetch.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointPaths {
    pub schedule: String,
    pub exam: String,
    pub finance: String,
    pub terms: String,
    pub grades: String,
    pub course: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            schedule: "student/class_schedule/classScheduleGetStudentClassSchedule".into(),
            exam: "student/exam/getStudentExamSchedule".into(),
            finance: "newfinancial/main/getFinancialStatus".into(),
            terms: "scoring/ViewGrade/getPeriodByBinusianId".into(),
            grades: "scoring/ViewGrade/getStudentScore/".into(),
            course: "student/course/getStudentCourse/".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub endpoints: EndpointPaths,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Portal session cookie, sent verbatim as the `Cookie` header.
    #[serde(default)]
    pub session_cookie: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoints: EndpointPaths::default(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            session_cookie: String::new(),
        }
    }
}

impl GatewayConfig {
    /// Whether a session cookie is available for authenticated requests.
    #[must_use]
    pub fn has_session(&self) -> bool {
        !self.session_cookie.is_empty()
    }

    /// Full URL for a resource. Fan-out kinds return the prefix that term
    /// codes are appended to. `None` for [`SyncKind::Account`].
    #[must_use]
    pub fn endpoint_url(&self, kind: SyncKind) -> Option<String> {
        let path = match kind {
            SyncKind::Schedule => &self.endpoints.schedule,
            SyncKind::Exam => &self.endpoints.exam,
            SyncKind::Finance => &self.endpoints.finance,
            SyncKind::Terms => &self.endpoints.terms,
            SyncKind::Grades => &self.endpoints.grades,
            SyncKind::Course => &self.endpoints.course,
            SyncKind::Account => return None,
        };
        Some(join_url(&self.base_url, path))
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
