//! Finance queries.

use crate::error::StoreError;
use crate::store::PortalStore;

impl PortalStore {
    /// Sum of all outstanding finance charges; `0.0` when there are none.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn finance_total(&self) -> Result<f64, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COALESCE(SUM(amount), 0.0) FROM finances", ())
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<f64>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::PortalStore;
    use portal_core::entities::FinanceCharge;

    fn charge(amount: f64) -> FinanceCharge {
        FinanceCharge {
            due_date: "2016-03-10".into(),
            description: "Tuition".into(),
            item_type: None,
            term: Some("1520".into()),
            amount,
        }
    }

    #[tokio::test]
    async fn total_is_zero_without_charges() {
        let store = PortalStore::open_local(":memory:").await.unwrap();
        assert!(store.finance_total().await.unwrap().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn total_sums_amounts() {
        let store = PortalStore::open_local(":memory:").await.unwrap();
        let tx = store.begin().await.unwrap();
        tx.clear_and_insert(&[charge(1_000_000.0), charge(250_000.5)])
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let total = store.finance_total().await.unwrap();
        assert!((total - 1_250_000.5).abs() < 1e-6);
    }
}
