pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::memory_store::InMemoryReceiptStore;
pub use config::ServerSettings;
pub use crate::core::{processor::ReceiptProcessor, scoring::compute_score};
pub use domain::model::{Receipt, ReceiptPayload};
pub use utils::error::{ReceiptError, Result};
