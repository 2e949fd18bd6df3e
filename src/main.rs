use anyhow::Context;
use clap::Parser;
use receipt_processor::adapters::http;
use receipt_processor::utils::{logger, validation::Validate};
use receipt_processor::{CliConfig, InMemoryReceiptStore, ReceiptProcessor};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_server_logger(
        settings.verbose,
        settings.log_level.as_deref(),
        settings.log_format,
    );

    tracing::info!("Starting receipt-processor");
    tracing::debug!("Settings: {:?}", settings);

    let listener = TcpListener::bind(&settings.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind))?;

    let processor = Arc::new(ReceiptProcessor::new(InMemoryReceiptStore::new()));

    http::serve(listener, processor, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown requested");
}
