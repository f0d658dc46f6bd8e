//! Sync request kinds and stored collection identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SyncKind
// ---------------------------------------------------------------------------

/// A named synchronization request accepted by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncKind {
    Schedule,
    Exam,
    Finance,
    Grades,
    Terms,
    Course,
    /// Reserved; syncing it is a no-op.
    Account,
}

impl SyncKind {
    /// Order used by a full refresh. Terms comes first because Grades and
    /// Course fan out over the stored term set.
    pub const FULL_REFRESH: [Self; 7] = [
        Self::Terms,
        Self::Exam,
        Self::Schedule,
        Self::Finance,
        Self::Grades,
        Self::Course,
        Self::Account,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::Exam => "exam",
            Self::Finance => "finance",
            Self::Grades => "grades",
            Self::Terms => "terms",
            Self::Course => "course",
            Self::Account => "account",
        }
    }

    /// Whether this kind issues one fetch per known term.
    #[must_use]
    pub const fn fans_out_over_terms(self) -> bool {
        matches!(self, Self::Grades | Self::Course)
    }

    /// Collections written by this kind's pipeline.
    #[must_use]
    pub const fn collections(self) -> &'static [Collection] {
        match self {
            Self::Schedule => &[Collection::Schedules, Collection::Dates],
            Self::Exam => &[Collection::Exams, Collection::Dates],
            Self::Finance => &[Collection::Finances, Collection::Dates],
            Self::Grades => &[Collection::Grades, Collection::GradeCourses],
            Self::Terms => &[Collection::Terms],
            Self::Course => &[Collection::Courses],
            Self::Account => &[],
        }
    }
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "schedule" | "schedules" => Ok(Self::Schedule),
            "exam" | "exams" => Ok(Self::Exam),
            "finance" | "finances" => Ok(Self::Finance),
            "grades" | "grade" => Ok(Self::Grades),
            "terms" | "term" => Ok(Self::Terms),
            "course" | "courses" => Ok(Self::Course),
            "account" => Ok(Self::Account),
            _ => Err(CoreError::UnknownKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// A record collection in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Schedules,
    Exams,
    Finances,
    Dates,
    Terms,
    Grades,
    GradeCourses,
    Courses,
}

impl Collection {
    pub const ALL: [Self; 8] = [
        Self::Schedules,
        Self::Exams,
        Self::Finances,
        Self::Dates,
        Self::Terms,
        Self::Grades,
        Self::GradeCourses,
        Self::Courses,
    ];

    /// SQL table backing this collection.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Exams => "exams",
            Self::Finances => "finances",
            Self::Dates => "calendar_dates",
            Self::Terms => "terms",
            Self::Grades => "grades",
            Self::GradeCourses => "grade_courses",
            Self::Courses => "courses",
        }
    }

    /// Whether a sync clears this collection before inserting.
    ///
    /// Dates, terms, and courses accumulate across syncs and are only
    /// ever upserted by key.
    #[must_use]
    pub const fn is_full_replace(self) -> bool {
        matches!(
            self,
            Self::Schedules | Self::Exams | Self::Finances | Self::Grades | Self::GradeCourses
        )
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Collection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.table() == s || c.table().trim_end_matches('s') == s)
            .ok_or_else(|| CoreError::UnknownCollection(s.to_string()))
    }
}
