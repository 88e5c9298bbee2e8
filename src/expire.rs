use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::ec2::Ec2Client;
use crate::error::SweepError;

#[derive(Debug, Default)]
pub struct ExpireStats {
    pub deleted: usize,
    pub failed: usize,
}

/// Expiration sweep: delete every snapshot whose DeleteOn tag equals today's
/// weekday name.
///
/// Each deletion is attempted independently. A failed deletion is logged and
/// the sweep moves on; only the enumeration call itself is fatal. The
/// remaining snapshots become due again next week.
pub async fn run(ec2: &Ec2Client, today: &str, dry_run: bool) -> Result<ExpireStats> {
    let snapshots = ec2.snapshots_due(today).await?;

    let mut stats = ExpireStats::default();

    if snapshots.is_empty() {
        info!(
            deletion_day = %today,
            "There are no snapshots to delete"
        );
        return Ok(stats);
    }

    info!(
        deletion_day = %today,
        snapshot_count = snapshots.len(),
        "Found snapshots due for deletion"
    );

    for snapshot in &snapshots {
        let snapshot_id = snapshot.snapshot_id().ok_or(SweepError::MissingSnapshotId)?;

        debug!(
            snapshot_id = %snapshot_id,
            volume_id = snapshot.volume_id().unwrap_or("unknown"),
            start_time = ?snapshot.start_time(),
            "Processing expired snapshot"
        );

        if dry_run {
            warn!(
                snapshot_id = %snapshot_id,
                action = "delete",
                "DRY RUN: Would delete snapshot (no action taken)"
            );
            continue;
        }

        match ec2.delete_snapshot(snapshot_id).await {
            Ok(()) => {
                stats.deleted += 1;
                info!(
                    snapshot_id = %snapshot_id,
                    deleted_count = stats.deleted,
                    "Deleted snapshot"
                );
            }
            Err(e) => {
                stats.failed += 1;
                error!(
                    snapshot_id = %snapshot_id,
                    error = %e,
                    failed_count = stats.failed,
                    "Failed to delete snapshot, continuing with remaining snapshots"
                );
            }
        }
    }

    info!(
        deletion_day = %today,
        deleted = stats.deleted,
        failed = stats.failed,
        "Expiration sweep completed"
    );

    Ok(stats)
}
