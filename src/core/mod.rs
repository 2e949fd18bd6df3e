pub mod processor;
pub mod scoring;

pub use crate::domain::model::{Receipt, ReceiptPayload, StoredReceipt};
pub use crate::domain::ports::ReceiptStore;
pub use crate::utils::error::Result;
