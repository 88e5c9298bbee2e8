use aws_sdk_ec2::types::{Filter, ResourceType, Tag, TagSpecification};
use chrono::{Local, NaiveDate};

use crate::types::VolumeSnapshot;

// Tag contract shared with the scheduled deletion side
pub const TAG_BACKUP: &str = "Backup";
pub const TAG_BACKUP_ELIGIBLE: &str = "Yes";
pub const TAG_DELETE_ON: &str = "DeleteOn";
pub const TAG_NAME: &str = "Name";
pub const TAG_VOLUME_ID: &str = "volume_id";
pub const TAG_ORIGINATOR: &str = "Originator";
pub const ORIGINATOR: &str = "Lambda";
pub const NO_NAME_SENTINEL: &str = "No_Name_Tag";

/// Weekday name for this run, e.g. "Tuesday".
///
/// Computed once per invocation and passed into both sweeps so they agree on
/// the deletion day. A snapshot tagged with today's weekday at creation
/// becomes due the next time the weekday comes around (~one week retention).
pub fn weekday_today() -> String {
    weekday_name(Local::now().date_naive())
}

pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Filter matching instances opted into backups. Exact, case-sensitive match.
pub fn backup_instances_filter() -> Filter {
    Filter::builder()
        .name(format!("tag:{TAG_BACKUP}"))
        .values(TAG_BACKUP_ELIGIBLE)
        .build()
}

/// Filter matching snapshots whose retention expires on the given weekday.
pub fn expired_snapshots_filter(today: &str) -> Filter {
    Filter::builder()
        .name(format!("tag:{TAG_DELETE_ON}"))
        .values(today)
        .build()
}

/// Instances are displayed by their key pair name; an instance launched
/// without one gets a sentinel instead of failing the sweep.
pub fn resolve_instance_name(key_name: Option<&str>) -> &str {
    match key_name {
        Some(name) if !name.is_empty() => name,
        _ => NO_NAME_SENTINEL,
    }
}

pub fn snapshot_name(volume: &VolumeSnapshot, today: &str) -> String {
    format!(
        "{}_{}_{}_{}",
        volume.device_name, volume.instance_name, volume.instance_id, today
    )
}

/// Operator-facing description: device, volume id, instance name and id.
pub fn snapshot_description(volume: &VolumeSnapshot) -> String {
    format!(
        "Snapshot of {} ({}) attached to instance {} ({})",
        volume.device_name, volume.volume_id, volume.instance_name, volume.instance_id
    )
}

pub fn snapshot_tags(volume: &VolumeSnapshot, today: &str) -> Vec<Tag> {
    vec![
        tag(TAG_DELETE_ON, today),
        tag(TAG_NAME, &snapshot_name(volume, today)),
        tag(TAG_VOLUME_ID, &volume.volume_id),
        tag(TAG_ORIGINATOR, ORIGINATOR),
    ]
}

pub fn snapshot_tag_specification(volume: &VolumeSnapshot, today: &str) -> TagSpecification {
    TagSpecification::builder()
        .resource_type(ResourceType::Snapshot)
        .set_tags(Some(snapshot_tags(volume, today)))
        .build()
}

fn tag(key: &str, value: &str) -> Tag {
    Tag::builder().key(key).value(value).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web1_root_volume() -> VolumeSnapshot {
        VolumeSnapshot {
            device_name: "/dev/sda1".to_string(),
            volume_id: "vol-123".to_string(),
            instance_id: "i-abc".to_string(),
            instance_name: "web1".to_string(),
        }
    }

    fn tag_value<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
        tags.iter()
            .find(|tag| tag.key() == Some(key))
            .and_then(|tag| tag.value())
    }

    #[test]
    fn test_weekday_name_known_dates() {
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        assert_eq!(weekday_name(monday), "Monday");
        assert_eq!(weekday_name(tuesday), "Tuesday");
        assert_eq!(weekday_name(sunday), "Sunday");
    }

    #[test]
    fn test_backup_filter_matches_exact_tag() {
        let filter = backup_instances_filter();
        assert_eq!(filter.name(), Some("tag:Backup"));
        assert_eq!(filter.values(), &["Yes".to_string()]);
    }

    #[test]
    fn test_expired_filter_carries_weekday() {
        let filter = expired_snapshots_filter("Tuesday");
        assert_eq!(filter.name(), Some("tag:DeleteOn"));
        assert_eq!(filter.values(), &["Tuesday".to_string()]);
    }

    #[test]
    fn test_resolve_instance_name_present() {
        assert_eq!(resolve_instance_name(Some("web1")), "web1");
    }

    #[test]
    fn test_resolve_instance_name_absent_yields_sentinel() {
        assert_eq!(resolve_instance_name(None), "No_Name_Tag");
    }

    #[test]
    fn test_resolve_instance_name_empty_yields_sentinel() {
        assert_eq!(resolve_instance_name(Some("")), "No_Name_Tag");
    }

    #[test]
    fn test_snapshot_name_composition() {
        assert_eq!(
            snapshot_name(&web1_root_volume(), "Tuesday"),
            "/dev/sda1_web1_i-abc_Tuesday"
        );
    }

    #[test]
    fn test_snapshot_tags_carry_required_four() {
        let tags = snapshot_tags(&web1_root_volume(), "Tuesday");

        assert_eq!(tags.len(), 4, "Exactly four tags must be produced");
        assert_eq!(tag_value(&tags, "DeleteOn"), Some("Tuesday"));
        assert_eq!(tag_value(&tags, "Name"), Some("/dev/sda1_web1_i-abc_Tuesday"));
        assert_eq!(tag_value(&tags, "volume_id"), Some("vol-123"));
        assert_eq!(tag_value(&tags, "Originator"), Some("Lambda"));
    }

    #[test]
    fn test_tag_specification_targets_snapshot_resource() {
        let spec = snapshot_tag_specification(&web1_root_volume(), "Friday");
        assert_eq!(spec.resource_type(), Some(&ResourceType::Snapshot));
        assert_eq!(spec.tags().len(), 4);
    }

    #[test]
    fn test_description_contains_all_identifiers() {
        let description = snapshot_description(&web1_root_volume());
        for identifier in ["/dev/sda1", "vol-123", "i-abc", "web1"] {
            assert!(
                description.contains(identifier),
                "Description '{}' must contain '{}'",
                description,
                identifier
            );
        }
    }
}
