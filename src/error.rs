use thiserror::Error;

/// Malformed records in EC2 API responses. These abort the run: a record
/// missing its identifier is not a per-item failure to tolerate.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Snapshot record is missing a snapshot id")]
    MissingSnapshotId,

    #[error("Instance record is missing an instance id")]
    MissingInstanceId,

    #[error("Block device mapping on instance {instance_id} is missing a device name")]
    MissingDeviceName { instance_id: String },

    #[error("Device {device_name} on instance {instance_id} is missing a volume id")]
    MissingVolumeId {
        device_name: String,
        instance_id: String,
    },
}
