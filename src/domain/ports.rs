use crate::domain::model::StoredReceipt;
use crate::utils::error::Result;
use async_trait::async_trait;

/// id -> record association backing the processor.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    async fn put(&self, record: StoredReceipt) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<StoredReceipt>>;
}
