use anyhow::Context;
use clap::Parser;
use receipt_processor::adapters::client::ReceiptClient;
use receipt_processor::utils::logger;
use receipt_processor::ReceiptPayload;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "submit-receipt")]
#[command(about = "Submit a receipt JSON file to a running receipt-processor and print its points")]
struct Args {
    /// Path to the receipt JSON file
    receipt: PathBuf,

    /// Base URL of the receipt service
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_client_logger(args.verbose);

    let content = std::fs::read_to_string(&args.receipt)
        .with_context(|| format!("failed to read {}", args.receipt.display()))?;
    let payload: ReceiptPayload = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a receipt document", args.receipt.display()))?;

    let client = ReceiptClient::new(&args.server)?;

    let id = match client.submit(&payload).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("❌ Submission failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::info!("📨 Submitted {} as {}", args.receipt.display(), id);

    let points = client.points(&id).await?;

    println!("id: {}", id);
    println!("points: {}", points);

    Ok(())
}
