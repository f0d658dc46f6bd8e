//! Column mappings between entity structs and their tables.
//!
//! A [`Record`] names its collection, its columns in bind order, and its key
//! columns. The generic insert/upsert/select SQL in [`crate::tx`] and
//! [`crate::store`] is built from these constants.

mod dated;
mod term_scoped;

use portal_core::Collection;

use crate::error::StoreError;

/// An entity stored in one collection of the local store.
pub trait Record: Sized {
    const COLLECTION: Collection;
    /// Column names, in the order [`Record::to_values`] binds them and
    /// [`Record::from_row`] reads them.
    const COLUMNS: &'static [&'static str];
    /// Primary-key columns. Empty for collections that are only ever
    /// cleared and re-inserted.
    const KEY: &'static [&'static str];

    fn to_values(&self) -> Vec<libsql::Value>;

    /// # Errors
    ///
    /// Returns `StoreError` if a column is missing or has the wrong type.
    fn from_row(row: &libsql::Row) -> Result<Self, StoreError>;
}

fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

pub(crate) fn insert_sql<R: Record>() -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::COLLECTION.table(),
        R::COLUMNS.join(", "),
        placeholders(R::COLUMNS.len())
    )
}

/// `INSERT ... ON CONFLICT(key) DO UPDATE` over every non-key column.
pub(crate) fn upsert_sql<R: Record>() -> Result<String, StoreError> {
    if R::KEY.is_empty() {
        return Err(StoreError::InvalidState(format!(
            "{} has no key and cannot be upserted",
            R::COLLECTION
        )));
    }
    let updates: Vec<String> = R::COLUMNS
        .iter()
        .filter(|c| !R::KEY.contains(*c))
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();
    let conflict = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };
    Ok(format!(
        "{} ON CONFLICT({}) {conflict}",
        insert_sql::<R>(),
        R::KEY.join(", ")
    ))
}

pub(crate) fn select_sql<R: Record>() -> String {
    let order = if R::KEY.is_empty() {
        "rowid".to_string()
    } else {
        R::KEY.join(", ")
    };
    format!(
        "SELECT {} FROM {} ORDER BY {order}",
        R::COLUMNS.join(", "),
        R::COLLECTION.table()
    )
}
