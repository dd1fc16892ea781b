use clap::Parser;
use payout_pipeline::utils::{logger, validation::Validate};
use payout_pipeline::{ApiClient, CliConfig, TransferOrder, TransferPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting payout-pipeline CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let client = ApiClient::new(config.api_base_url.clone(), config.bearer_token());
    let pipeline = TransferPipeline::new(client, TransferOrder::default());

    match pipeline.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Transfer {} created with status '{}'",
                report.transfer_id,
                report.status
            );
        }
        Err(e) => {
            // Pipeline failures are logged but deliberately not mapped to a
            // distinct exit code.
            tracing::error!(
                "❌ Transfer pipeline failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("An error occurred during the transfer process:");
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        }
    }

    Ok(())
}
