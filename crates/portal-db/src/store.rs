//! Store layer used by the sync pipelines and by readers.
//!
//! `PortalStore` wraps `PortalDb` (raw connection) and exposes:
//! - [`PortalStore::begin`] for per-pipeline write transactions
//! - [`PortalStore::read_all`] and [`PortalStore::count`] for readers
//! - Repository methods added by the modules under `repos/`

use crate::PortalDb;
use crate::error::StoreError;
use crate::records::{Record, select_sql};
use crate::tx::SyncTransaction;

use portal_core::Collection;

pub struct PortalStore {
    db: PortalDb,
}

impl PortalStore {
    /// Open a store backed by a local libSQL file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrated.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = PortalDb::open_local(path).await?;
        Ok(Self { db })
    }

    #[must_use]
    pub const fn from_db(db: PortalDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &PortalDb {
        &self.db
    }

    /// Begin a write transaction for one pipeline.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a transaction cannot be started.
    pub async fn begin(&self) -> Result<SyncTransaction, StoreError> {
        let tx = self.db.writer().transaction().await?;
        Ok(SyncTransaction::new(tx))
    }

    /// Read every record of `R`'s collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a row cannot be mapped.
    pub async fn read_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let mut rows = self.db.conn().query(&select_sql::<R>(), ()).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(R::from_row(&row)?);
        }
        Ok(results)
    }

    /// Number of rows in `collection`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let mut rows = self
            .db
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {}", collection.table()), ())
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|_| StoreError::Query(format!("negative count {count}")))
    }
}
