use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::{Instance, Snapshot};
use tracing::{debug, info};

use crate::tags;
use crate::types::VolumeSnapshot;

pub struct Ec2Client {
    client: Client,
    region: String,
}

impl Ec2Client {
    /// Creates an EC2 client scoped to one region. The region is resolved by
    /// configuration before either sweep runs; there is no IMDS fallback.
    pub async fn new(region: &str) -> Self {
        debug!("Initializing AWS SDK configuration");

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        let client = Client::new(&config);

        info!(
            region = %region,
            "AWS EC2 client initialized successfully"
        );

        Self {
            client,
            region: region.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Snapshots whose DeleteOn tag equals the given weekday. Single response
    /// page; the fleet is small enough that pagination is not handled.
    pub async fn snapshots_due(&self, today: &str) -> Result<Vec<Snapshot>> {
        debug!(
            deletion_day = %today,
            api_action = "DescribeSnapshots",
            "Listing snapshots due for deletion"
        );

        let response = self
            .client
            .describe_snapshots()
            .filters(tags::expired_snapshots_filter(today))
            .send()
            .await
            .context("Failed to describe snapshots due for deletion")?;

        Ok(response.snapshots().to_vec())
    }

    pub async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        debug!(
            snapshot_id = %snapshot_id,
            api_action = "DeleteSnapshot",
            "Deleting snapshot"
        );

        self.client
            .delete_snapshot()
            .snapshot_id(snapshot_id)
            .send()
            .await
            .context(format!("Failed to delete snapshot {}", snapshot_id))?;

        Ok(())
    }

    /// Instances tagged Backup=Yes. Single response page, flattened across
    /// reservations.
    pub async fn backup_instances(&self) -> Result<Vec<Instance>> {
        debug!(
            api_action = "DescribeInstances",
            "Listing instances tagged for backup"
        );

        let response = self
            .client
            .describe_instances()
            .filters(tags::backup_instances_filter())
            .send()
            .await
            .context("Failed to describe instances tagged for backup")?;

        let instances: Vec<Instance> = response
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances().iter().cloned())
            .collect();

        debug!(
            instance_count = instances.len(),
            "Received backup-eligible instances"
        );

        Ok(instances)
    }

    pub async fn create_snapshot(&self, volume: &VolumeSnapshot, today: &str) -> Result<()> {
        info!(
            volume_id = %volume.volume_id,
            device_name = %volume.device_name,
            instance_id = %volume.instance_id,
            deletion_day = %today,
            api_action = "CreateSnapshot",
            "Creating snapshot for volume"
        );

        self.client
            .create_snapshot()
            .description(tags::snapshot_description(volume))
            .volume_id(&volume.volume_id)
            .tag_specifications(tags::snapshot_tag_specification(volume, today))
            .send()
            .await
            .context(format!(
                "Failed to create snapshot for volume {}",
                volume.volume_id
            ))?;

        Ok(())
    }
}
