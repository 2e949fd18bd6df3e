use crate::domain::model::StoredReceipt;
use crate::domain::ports::ReceiptStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-lifetime store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiptStore {
    receipts: Arc<RwLock<HashMap<String, StoredReceipt>>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.receipts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.receipts.read().await.is_empty()
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn put(&self, record: StoredReceipt) -> Result<()> {
        let mut receipts = self.receipts.write().await;
        receipts.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredReceipt>> {
        let receipts = self.receipts.read().await;
        Ok(receipts.get(id).cloned())
    }
}
