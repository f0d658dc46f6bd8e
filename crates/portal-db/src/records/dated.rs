//! Records that reference a [`CalendarDate`]: schedules, exams, finances.

use portal_core::Collection;
use portal_core::entities::{CalendarDate, ExamEntry, FinanceCharge, ScheduleEntry};

use super::Record;
use crate::error::StoreError;
use crate::helpers::{get_opt_string, opt_value};

impl Record for CalendarDate {
    const COLLECTION: Collection = Collection::Dates;
    const COLUMNS: &'static [&'static str] = &["date"];
    const KEY: &'static [&'static str] = &["date"];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![self.date.as_str().into()]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            date: row.get::<String>(0)?,
        })
    }
}

impl Record for ScheduleEntry {
    const COLLECTION: Collection = Collection::Schedules;
    const COLUMNS: &'static [&'static str] = &[
        "start_date",
        "start_time",
        "end_time",
        "course_code",
        "course_title",
        "class_section",
        "component",
        "room",
        "location",
        "delivery_mode",
        "week_session",
    ];
    const KEY: &'static [&'static str] = &[];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![
            self.start_date.as_str().into(),
            self.start_time.as_str().into(),
            self.end_time.as_str().into(),
            self.course_code.as_str().into(),
            self.course_title.as_str().into(),
            self.class_section.as_str().into(),
            self.component.as_str().into(),
            opt_value(self.room.as_deref()),
            opt_value(self.location.as_deref()),
            opt_value(self.delivery_mode.as_deref()),
            self.week_session.as_str().into(),
        ]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            start_date: row.get::<String>(0)?,
            start_time: row.get::<String>(1)?,
            end_time: row.get::<String>(2)?,
            course_code: row.get::<String>(3)?,
            course_title: row.get::<String>(4)?,
            class_section: row.get::<String>(5)?,
            component: row.get::<String>(6)?,
            room: get_opt_string(row, 7)?,
            location: get_opt_string(row, 8)?,
            delivery_mode: get_opt_string(row, 9)?,
            week_session: row.get::<String>(10)?,
        })
    }
}

impl Record for ExamEntry {
    const COLLECTION: Collection = Collection::Exams;
    const COLUMNS: &'static [&'static str] = &[
        "exam_date",
        "shift",
        "course_code",
        "course_title",
        "exam_type",
        "room",
        "seat",
    ];
    const KEY: &'static [&'static str] = &[];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![
            self.exam_date.as_str().into(),
            opt_value(self.shift.as_deref()),
            self.course_code.as_str().into(),
            self.course_title.as_str().into(),
            opt_value(self.exam_type.as_deref()),
            opt_value(self.room.as_deref()),
            opt_value(self.seat.as_deref()),
        ]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            exam_date: row.get::<String>(0)?,
            shift: get_opt_string(row, 1)?,
            course_code: row.get::<String>(2)?,
            course_title: row.get::<String>(3)?,
            exam_type: get_opt_string(row, 4)?,
            room: get_opt_string(row, 5)?,
            seat: get_opt_string(row, 6)?,
        })
    }
}

impl Record for FinanceCharge {
    const COLLECTION: Collection = Collection::Finances;
    const COLUMNS: &'static [&'static str] =
        &["due_date", "description", "item_type", "term", "amount"];
    const KEY: &'static [&'static str] = &[];

    fn to_values(&self) -> Vec<libsql::Value> {
        vec![
            self.due_date.as_str().into(),
            self.description.as_str().into(),
            opt_value(self.item_type.as_deref()),
            opt_value(self.term.as_deref()),
            self.amount.into(),
        ]
    }

    fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            due_date: row.get::<String>(0)?,
            description: row.get::<String>(1)?,
            item_type: get_opt_string(row, 2)?,
            term: get_opt_string(row, 3)?,
            amount: row.get::<f64>(4)?,
        })
    }
}
