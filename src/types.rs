use serde::Serialize;

/// One planned snapshot: a volume attached to a backup-eligible instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSnapshot {
    pub device_name: String,
    pub volume_id: String,
    pub instance_id: String,
    pub instance_name: String,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub status: String,
    pub region: String,
    pub deletion_day: String,
    pub snapshots_deleted: usize,
    pub delete_failures: usize,
    pub snapshots_created: usize,
    pub dry_run: bool,
    pub total_execution_time_seconds: f64,
}
