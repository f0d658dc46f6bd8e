//! # portal-db
//!
//! libSQL local store for records mirrored from the academic portal.
//!
//! Holds schedules, exams, finance charges, shared calendar dates, terms,
//! grades, and courses, plus a small preferences table. Every sync pipeline
//! writes through one [`tx::SyncTransaction`], so a collection never mixes
//! rows from two sync attempts.

pub mod error;
pub mod helpers;
mod migrations;
pub mod records;
pub mod repos;
pub mod store;
pub mod tx;

pub use error::StoreError;
pub use records::Record;
pub use store::PortalStore;
pub use tx::SyncTransaction;

use libsql::Builder;

const MEMORY_PATH: &str = ":memory:";
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Raw database handle: one libSQL database with a read connection and a
/// write connection.
///
/// File-backed stores run in WAL mode, so reads never observe a write
/// transaction that has not committed. An in-memory database exists only
/// inside a single connection, so both handles share it there.
pub struct PortalDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    writer: libsql::Connection,
}

impl PortalDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let writer = db.connect()?;

        let conn = if path == MEMORY_PATH {
            writer.clone()
        } else {
            pragma(&writer, "journal_mode = WAL").await?;
            pragma(&writer, &format!("busy_timeout = {BUSY_TIMEOUT_MS}")).await?;
            let reader = db.connect()?;
            pragma(&reader, &format!("busy_timeout = {BUSY_TIMEOUT_MS}")).await?;
            reader
        };

        let portal_db = Self { db, conn, writer };
        portal_db.run_migrations().await?;
        tracing::debug!(path, "opened local store");
        Ok(portal_db)
    }

    /// Connection for reads. Sees only committed data on file-backed stores.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Connection for writes and sync transactions.
    #[must_use]
    pub const fn writer(&self) -> &libsql::Connection {
        &self.writer
    }
}

/// Run a PRAGMA that reports its new value as a row.
async fn pragma(conn: &libsql::Connection, body: &str) -> Result<(), StoreError> {
    let mut rows = conn.query(&format!("PRAGMA {body}"), ()).await?;
    rows.next().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::Collection;

    async fn test_db() -> PortalDb {
        PortalDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = Collection::ALL
            .iter()
            .map(|c| c.table())
            .chain(std::iter::once("preferences"));
        for table in tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn course_key_is_unique() {
        let db = test_db().await;
        let insert = "INSERT INTO courses (term, class_number, course_code) VALUES ('1410', '100', 'MATH6025')";
        db.writer().execute(insert, ()).await.unwrap();
        assert!(db.writer().execute(insert, ()).await.is_err());
    }
}
