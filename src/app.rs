use std::sync::Arc;

use crate::cli::Args;
use crate::domain::transfer::{TransferReport, TransferService, TransferServiceApi};
use crate::error::{AppError, AppResult};
use crate::infrastructure::clients::{FreshRssClient, KarakeepClient};
use crate::infrastructure::config::Config;

/// Connect both collaborators and run one transfer pass
pub async fn run(args: &Args, config: &Config) -> AppResult<TransferReport> {
    tracing::info!("Starting FreshRSS to Karakeep transfer");

    // Bad patterns are usage errors; report them before touching the network
    let options = args.transfer_options()?;

    let freshrss_client = FreshRssClient::connect(&config.freshrss)
        .await
        .map_err(|e| AppError::SourceUnavailable(e.to_string()))?;
    tracing::info!(
        endpoint = %freshrss_client.endpoint(),
        "Successfully connected to FreshRSS API"
    );

    let karakeep_client = KarakeepClient::new(&config.karakeep)
        .map_err(|e| AppError::DestinationUnavailable(e.to_string()))?;
    tracing::info!(
        endpoint = %karakeep_client.endpoint(),
        "Successfully connected to Karakeep API"
    );

    let transfer_service = TransferService::new(
        Arc::new(freshrss_client),
        Arc::new(karakeep_client),
    );

    let report = transfer_service.run(&options).await?;

    tracing::info!(
        fetched = report.fetched,
        selected = report.selected,
        transferred = report.transferred,
        tag_failures = report.tag_failures,
        failed = report.failed,
        dry_run = report.dry_run,
        "FreshRSS to Karakeep transfer completed"
    );

    Ok(report)
}
