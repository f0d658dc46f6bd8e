//! Sync transactions.
//!
//! One [`SyncTransaction`] covers one resource pipeline: the clear of a
//! full-replace collection and every insert/upsert that follows either all
//! commit together or none do.

use portal_core::Collection;

use crate::error::StoreError;
use crate::records::{Record, insert_sql, upsert_sql};

/// An open write transaction on the local store.
///
/// Dropping it without [`SyncTransaction::commit`] rolls back.
pub struct SyncTransaction {
    tx: libsql::Transaction,
}

impl SyncTransaction {
    pub(crate) const fn new(tx: libsql::Transaction) -> Self {
        Self { tx }
    }

    /// Delete every row of `collection`. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    pub async fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        let removed = self
            .tx
            .execute(&format!("DELETE FROM {}", collection.table()), ())
            .await?;
        tracing::debug!(%collection, removed, "cleared collection");
        Ok(removed)
    }

    /// Insert records as new rows.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any insert fails; earlier inserts stay pending
    /// in the transaction until it is rolled back.
    pub async fn insert<R: Record>(&self, records: &[R]) -> Result<usize, StoreError> {
        let sql = insert_sql::<R>();
        for record in records {
            self.tx
                .execute(&sql, libsql::params_from_iter(record.to_values()))
                .await?;
        }
        Ok(records.len())
    }

    /// Insert or update records by their key columns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if `R` has no key, or `StoreError`
    /// if a statement fails.
    pub async fn upsert<R: Record>(&self, records: &[R]) -> Result<usize, StoreError> {
        let sql = upsert_sql::<R>()?;
        for record in records {
            self.tx
                .execute(&sql, libsql::params_from_iter(record.to_values()))
                .await?;
        }
        Ok(records.len())
    }

    /// Clear `R`'s collection, then insert `records`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the clear or any insert fails.
    pub async fn clear_and_insert<R: Record>(&self, records: &[R]) -> Result<usize, StoreError> {
        self.clear(R::COLLECTION).await?;
        self.insert(records).await
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the commit fails.
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the rollback fails.
    pub async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
