use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ebs-backup",
    version,
    about = "Tag-driven EBS snapshot backup and expiration for EC2 instances"
)]
pub struct Config {
    /// AWS region hosting the instances and snapshots
    #[arg(long, env = "REGION", default_value = "eu-central-1")]
    pub region: String,

    /// Dry run mode (no snapshot creation or deletion)
    #[arg(long, env = "DRY_RUN", default_value = "false")]
    pub dry_run: bool,

    /// Log format: json or pretty
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn display(&self) {
        tracing::info!(
            region = %self.region,
            dry_run = self.dry_run,
            log_format = %self.log_format,
            log_level = %self.log_level,
            "Configuration initialized"
        );

        if self.dry_run {
            tracing::warn!(
                "DRY RUN MODE ENABLED - No snapshots will be created or deleted, only logged"
            );
        }
    }
}
