use anyhow::Result;
use std::time::Instant;
use tracing::{error, info};

mod backup;
mod config;
mod ec2;
mod error;
mod expire;
mod logging;
mod tags;
mod types;

use config::Config;
use ec2::Ec2Client;
use expire::ExpireStats;
use types::RunSummary;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args();
    logging::init(&config.log_format, &config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT"),
        build_date = env!("BUILD_DATE"),
        "EBS snapshot backup starting"
    );

    config.display();

    // One deletion day per run; both sweeps see the same weekday.
    let today = tags::weekday_today();
    info!(deletion_day = %today, "Resolved weekday for this run");

    let start = Instant::now();

    match run(&config, &today).await {
        Ok((expired, created)) => {
            let total_time = start.elapsed().as_secs_f64();

            info!(
                status = "success",
                deletion_day = %today,
                snapshots_deleted = expired.deleted,
                delete_failures = expired.failed,
                snapshots_created = created,
                total_execution_seconds = total_time,
                "Run completed"
            );

            let summary = RunSummary {
                status: "Success".to_string(),
                region: config.region.clone(),
                deletion_day: today,
                snapshots_deleted: expired.deleted,
                delete_failures: expired.failed,
                snapshots_created: created,
                dry_run: config.dry_run,
                total_execution_time_seconds: total_time,
            };

            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(e) => {
            error!(
                status = "failed",
                error = %e,
                deletion_day = %today,
                total_execution_seconds = start.elapsed().as_secs_f64(),
                "Run failed"
            );
            Err(e)
        }
    }
}

/// Expiration sweep first, then backup sweep. Deletion frees snapshot quota
/// before new snapshots are created; neither sweep depends on the other's
/// output.
async fn run(config: &Config, today: &str) -> Result<(ExpireStats, usize)> {
    let ec2 = Ec2Client::new(&config.region).await;

    info!("Checking for expired snapshots");
    let expired = expire::run(&ec2, today, config.dry_run).await?;

    info!("Listing EC2 instances that need backups");
    let created = backup::run(&ec2, today, config.dry_run).await?;

    Ok((expired, created))
}
