//! Terms and the records fetched per term: grades and courses.

use portal_core::Collection;
use portal_core::entities::{CourseEntry, GradeCourseEntry, GradeEntry, Term};

use super::Record;
use crate::error::StoreError;
use crate::helpers::{get_opt_string, opt_value};

impl Record for Term {
    const COLLECTION: Collection = Collection::Terms;
    const COLUMNS: &'static [&'static str] = &["code", "label"];
    const KEY: &'static [&'static str] = &["code"];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![self.code.as_str().into(), self.label.as_str().into()]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            code: row.get::<String>(0)?,
            label: row.get::<String>(1)?,
        })
    }
}

impl Record for GradeEntry {
    const COLLECTION: Collection = Collection::Grades;
    const COLUMNS: &'static [&'static str] = &[
        "term",
        "course_code",
        "course",
        "component",
        "weight",
        "score",
    ];
    const KEY: &'static [&'static str] = &[];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![
            self.term.as_str().into(),
            self.course_code.as_str().into(),
            self.course.as_str().into(),
            opt_value(self.component.as_deref()),
            self.weight.as_str().into(),
            self.score.as_str().into(),
        ]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            term: row.get::<String>(0)?,
            course_code: row.get::<String>(1)?,
            course: row.get::<String>(2)?,
            component: get_opt_string(row, 3)?,
            weight: row.get::<String>(4)?,
            score: row.get::<String>(5)?,
        })
    }
}

impl Record for GradeCourseEntry {
    const COLLECTION: Collection = Collection::GradeCourses;
    const COLUMNS: &'static [&'static str] = &["term", "course_code", "course", "grade"];
    const KEY: &'static [&'static str] = &["term", "course_code"];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![
            self.term.as_str().into(),
            self.course_code.as_str().into(),
            self.course.as_str().into(),
            opt_value(self.grade.as_deref()),
        ]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            term: row.get::<String>(0)?,
            course_code: row.get::<String>(1)?,
            course: row.get::<String>(2)?,
            grade: get_opt_string(row, 3)?,
        })
    }
}

impl Record for CourseEntry {
    const COLLECTION: Collection = Collection::Courses;
    const COLUMNS: &'static [&'static str] = &[
        "term",
        "class_number",
        "course_code",
        "course_title",
        "component",
        "class_section",
    ];
    const KEY: &'static [&'static str] = &["term", "class_number"];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![
            self.term.as_str().into(),
            self.class_number.as_str().into(),
            self.course_code.as_str().into(),
            self.course_title.as_str().into(),
            opt_value(self.component.as_deref()),
            opt_value(self.class_section.as_deref()),
        ]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            term: row.get::<String>(0)?,
            class_number: row.get::<String>(1)?,
            course_code: row.get::<String>(2)?,
            course_title: row.get::<String>(3)?,
            component: get_opt_string(row, 4)?,
            class_section: get_opt_string(row, 5)?,
        })
    }
}
