use anyhow::Result;
use aws_sdk_ec2::types::Instance;
use tracing::{debug, info, warn};

use crate::ec2::Ec2Client;
use crate::error::SweepError;
use crate::tags;
use crate::types::VolumeSnapshot;

/// Backup sweep: one snapshot per volume attached to every instance tagged
/// Backup=Yes.
///
/// Unlike the expiration sweep, creation failures are not tolerated: the
/// first CreateSnapshot error propagates and aborts the run, leaving the
/// external scheduler to observe the failed invocation.
pub async fn run(ec2: &Ec2Client, today: &str, dry_run: bool) -> Result<usize> {
    let instances = ec2.backup_instances().await?;

    if instances.is_empty() {
        info!("No instances tagged for backup, no snapshots needed");
        return Ok(0);
    }

    info!(
        instance_count = instances.len(),
        "Found instances tagged for backup"
    );

    let mut created = 0;

    for instance in &instances {
        let volumes = plan_instance(instance)?;

        debug!(
            instance_id = instance.instance_id().unwrap_or("unknown"),
            volume_count = volumes.len(),
            "Setting up backups for instance"
        );

        for volume in &volumes {
            if dry_run {
                warn!(
                    volume_id = %volume.volume_id,
                    device_name = %volume.device_name,
                    instance_id = %volume.instance_id,
                    action = "create_snapshot",
                    "DRY RUN: Would create snapshot (no action taken)"
                );
                continue;
            }

            ec2.create_snapshot(volume, today).await?;
            created += 1;
        }
    }

    info!(
        instance_count = instances.len(),
        snapshots_created = created,
        "Backup sweep completed"
    );

    Ok(created)
}

/// Resolves an instance into the list of snapshots to take, one per block
/// device mapping. A mapping that is present but missing its device name or
/// volume id is a malformed record, not something to skip over.
pub fn plan_instance(instance: &Instance) -> Result<Vec<VolumeSnapshot>, SweepError> {
    let instance_id = instance
        .instance_id()
        .ok_or(SweepError::MissingInstanceId)?;
    let instance_name = tags::resolve_instance_name(instance.key_name());

    let mut volumes = Vec::new();

    for mapping in instance.block_device_mappings() {
        let device_name = mapping
            .device_name()
            .ok_or_else(|| SweepError::MissingDeviceName {
                instance_id: instance_id.to_string(),
            })?;
        let volume_id = mapping
            .ebs()
            .and_then(|ebs| ebs.volume_id())
            .ok_or_else(|| SweepError::MissingVolumeId {
                device_name: device_name.to_string(),
                instance_id: instance_id.to_string(),
            })?;

        volumes.push(VolumeSnapshot {
            device_name: device_name.to_string(),
            volume_id: volume_id.to_string(),
            instance_id: instance_id.to_string(),
            instance_name: instance_name.to_string(),
        });
    }

    Ok(volumes)
}
