use crate::core::scoring::compute_score;
use crate::domain::model::{Receipt, ReceiptPayload, StoredReceipt};
use crate::domain::ports::ReceiptStore;
use crate::utils::error::{ReceiptError, Result};
use uuid::Uuid;

pub struct ReceiptProcessor<S: ReceiptStore> {
    store: S,
}

impl<S: ReceiptStore> ReceiptProcessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and scores the receipt, stores it under a new id and returns the id.
    pub async fn submit(&self, payload: ReceiptPayload) -> Result<String> {
        let receipt = Receipt::try_from(payload)?;
        let points = compute_score(&receipt);

        let id = Uuid::new_v4().to_string();
        self.store
            .put(StoredReceipt {
                id: id.clone(),
                receipt,
                points,
            })
            .await?;

        tracing::debug!("Stored receipt {} ({} points)", id, points);
        Ok(id)
    }

    pub async fn points(&self, id: &str) -> Result<u64> {
        match self.store.get(id).await? {
            Some(record) => Ok(record.points),
            None => Err(ReceiptError::ReceiptNotFound { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemoryReceiptStore;

    fn corner_market() -> ReceiptPayload {
        serde_json::from_value(serde_json::json!({
            "retailer": "M&M Corner Market",
            "purchaseDate": "2022-03-20",
            "purchaseTime": "14:33",
            "items": [
                {"shortDescription": "Gatorade", "price": "2.25"},
                {"shortDescription": "Gatorade", "price": "2.25"},
                {"shortDescription": "Gatorade", "price": "2.25"},
                {"shortDescription": "Gatorade", "price": "2.25"}
            ],
            "total": "9.00"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_get_points() {
        let store = InMemoryReceiptStore::new();
        let processor = ReceiptProcessor::new(store.clone());

        let id = processor.submit(corner_market()).await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(processor.points(&id).await.unwrap(), 109);

        let record = store.get(&id).await.unwrap().unwrap();
        assert_eq!(record.receipt.retailer, "M&M Corner Market");
        assert_eq!(record.points, 109);
    }

    #[tokio::test]
    async fn test_each_submission_gets_a_fresh_id() {
        let processor = ReceiptProcessor::new(InMemoryReceiptStore::new());

        let first = processor.submit(corner_market()).await.unwrap();
        let second = processor.submit(corner_market()).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(processor.points(&second).await.unwrap(), 109);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let processor = ReceiptProcessor::new(InMemoryReceiptStore::new());

        let err = processor.points("does-not-exist").await.unwrap_err();
        assert!(matches!(err, ReceiptError::ReceiptNotFound { ref id } if id == "does-not-exist"));
    }

    #[tokio::test]
    async fn test_malformed_receipt_is_not_stored() {
        let store = InMemoryReceiptStore::new();
        let processor = ReceiptProcessor::new(store.clone());

        let mut payload = corner_market();
        payload.total = "9.001".to_string();

        let err = processor.submit(payload).await.unwrap_err();
        assert!(matches!(err, ReceiptError::MalformedReceipt { ref field, .. } if field == "total"));
        assert_eq!(store.len().await, 0);
    }
}
