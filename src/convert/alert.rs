//! Alert tree mapping.
//!
//! Only the terminal nodes beneath the configured root become records;
//! intermediate nodes just group checks. Each record is tagged with the
//! node's path from the tree root and carries either a numeric `float`
//! field or a textual `string` field, never both.

use sapmon_sapcontrol::{must_float, parse_value_unit};
use sapmon_types::{
    AlertNode, AlertTree, MetricRecord, MetricRecordBuilder, ProcessingError, ACTUAL_VALUE_FIELD,
    FLOAT_FIELD, STRING_FIELD,
};
use tracing::{trace, warn};

use crate::config::{Settings, TimestampScope};

/// One record per leaf under `settings.root_node`, in pre-order.
///
/// Nodes that cannot be tagged are reported and skipped.
pub fn map_alert_tree(
    tree: &AlertTree,
    settings: &Settings,
) -> (Vec<MetricRecord>, Vec<ProcessingError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    if !tree.contains(settings.root_node) {
        warn!(
            root_node = settings.root_node,
            nodes = tree.len(),
            "configured root node is not part of the alert tree"
        );
        errors.push(ProcessingError::new(format!(
            "root node {} not found in alert tree",
            settings.root_node
        )));
        return (records, errors);
    }

    for node in tree.leaves_under(settings.root_node) {
        match alert_record(tree, node, settings) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    (records, errors)
}

fn alert_record(
    tree: &AlertTree,
    node: &AlertNode,
    settings: &Settings,
) -> Result<MetricRecord, ProcessingError> {
    let path = tree.path_to_root(node.id).ok_or_else(|| {
        ProcessingError::new(format!(
            "alert node {} ({}): no path to the tree root",
            node.id, node.name
        ))
    })?;
    let names: Vec<&str> = path.iter().map(|n| n.name.as_str()).collect();

    let (key, mut value) = if settings.uses_root_tag() {
        // The first branch is the key, so the node must sit below it or the
        // record would carry no tag value.
        let [_, first, rest @ ..] = names.as_slice() else {
            return Err(ProcessingError::new(format!(
                "alert node {} ({}): tree root has no branch to use as tag key",
                node.id, node.name
            )));
        };
        if rest.is_empty() {
            return Err(ProcessingError::new(format!(
                "alert node {} ({}): no path below branch {:?} to use as tag value",
                node.id, node.name, first
            )));
        }
        (first.to_string(), rest.join(settings.delimiter.as_str()))
    } else {
        let [_, rest @ ..] = names.as_slice() else {
            return Err(ProcessingError::new(format!(
                "alert node {} ({}): empty path",
                node.id, node.name
            )));
        };
        if rest.is_empty() {
            return Err(ProcessingError::new(format!(
                "alert node {} ({}): the tree root itself has no path to use as tag value",
                node.id, node.name
            )));
        }
        (settings.tag_name.clone(), rest.join(settings.delimiter.as_str()))
    };

    let mut builder = MetricRecord::builder(settings.measurement.as_str());

    // Always a float, even for integral values: the same series switches
    // between textual states and numbers, and the field type may not drift.
    let parsed = parse_value_unit(&node.description);
    match parsed.value {
        Some(number) if parsed.is_numeric(&node.description) => {
            if !parsed.unit.is_empty() {
                value.push_str(" in ");
                value.push_str(&parsed.unit);
            }
            builder = builder.field(FLOAT_FIELD, must_float(number));
        }
        _ => builder = builder.field(STRING_FIELD, node.description.as_str()),
    }

    builder = builder
        .tag(settings.replace(&key), settings.replace(&value))
        .field(ACTUAL_VALUE_FIELD, node.health_state.severity());

    if let Some(nanos) = source_timestamp(node, &builder, settings) {
        builder = builder.timestamp(nanos);
    }

    trace!(id = node.id, tag = %key, "mapped alert node");
    Ok(builder.build())
}

/// The node's time in epoch nanoseconds, if the timestamp policy selects
/// this record.
fn source_timestamp(
    node: &AlertNode,
    builder: &MetricRecordBuilder,
    settings: &Settings,
) -> Option<i64> {
    if !settings.source_timestamp {
        return None;
    }

    let selected = match settings.timestamp_scope {
        TimestampScope::All => true,
        TimestampScope::String => builder.has_field(STRING_FIELD),
        TimestampScope::Float => builder.has_field(FLOAT_FIELD),
    };
    if !selected {
        return None;
    }

    node.time.and_then(|t| t.timestamp_nanos_opt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sapmon_types::{FieldValue, HealthState};

    const NANOS: i64 = 1_792_137_600_000_000_000;

    fn tree() -> AlertTree {
        let time = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        AlertTree::new(vec![
            AlertNode::new(0, None, "SAP", HealthState::Yellow),
            AlertNode::new(1, Some(0), "Host", HealthState::Yellow),
            AlertNode::new(2, Some(1), "CPU", HealthState::Yellow)
                .with_description("95 %")
                .with_time(time),
            AlertNode::new(3, Some(1), "Dialog Status", HealthState::Green)
                .with_description("Running")
                .with_time(time),
            AlertNode::new(4, Some(0), "Users", HealthState::Green).with_description("12"),
        ])
        .unwrap()
    }

    fn by_tag<'a>(records: &'a [MetricRecord], key: &str, value: &str) -> &'a MetricRecord {
        records
            .iter()
            .find(|r| r.tag(key) == Some(value))
            .unwrap_or_else(|| panic!("no record tagged {key}={value:?} in {records:?}"))
    }

    #[test]
    fn test_numeric_leaf_with_unit() {
        let (records, errors) = map_alert_tree(&tree(), &Settings::default());
        assert!(errors.is_empty());
        assert_eq!(records.len(), 3);

        let cpu = by_tag(&records, "ccms", "Host CPU in %");
        assert_eq!(cpu.field(FLOAT_FIELD), Some(&FieldValue::Float(95.0)));
        assert!(!cpu.has_field(STRING_FIELD));
        assert_eq!(cpu.field(ACTUAL_VALUE_FIELD), Some(&FieldValue::Int(1)));
        assert_eq!(cpu.timestamp, None);
    }

    #[test]
    fn test_only_leaves_in_preorder() {
        let (records, _) = map_alert_tree(&tree(), &Settings::default());
        let tags: Vec<_> = records.iter().filter_map(|r| r.tag("ccms")).collect();
        assert_eq!(tags, ["Host CPU in %", "Host Dialog Status", "Users"]);
    }

    #[test]
    fn test_bare_number_has_no_unit_suffix() {
        let (records, _) = map_alert_tree(&tree(), &Settings::default());
        let users = by_tag(&records, "ccms", "Users");
        assert_eq!(users.field(FLOAT_FIELD), Some(&FieldValue::Float(12.0)));
    }

    #[test]
    fn test_text_description_is_string_field() {
        let (records, _) = map_alert_tree(&tree(), &Settings::default());
        let status = by_tag(&records, "ccms", "Host Dialog Status");
        assert_eq!(
            status.field(STRING_FIELD),
            Some(&FieldValue::String("Running".to_string()))
        );
        assert!(!status.has_field(FLOAT_FIELD));
        assert_eq!(status.field(ACTUAL_VALUE_FIELD), Some(&FieldValue::Int(0)));
    }

    #[test]
    fn test_root_tag_uses_first_branch_as_key() {
        let settings = Settings {
            tag_name: "ROOT".to_string(),
            ..Settings::default()
        };
        let (records, _) = map_alert_tree(&tree(), &settings);

        let cpu = &records[0];
        assert_eq!(cpu.tags.len(), 1);
        assert_eq!(cpu.tag("Host"), Some("CPU in %"));
        assert_eq!(records[1].tag("Host"), Some("Dialog Status"));
    }

    #[test]
    fn test_root_tag_skips_direct_children_of_tree_root() {
        let settings = Settings {
            tag_name: "ROOT".to_string(),
            ..Settings::default()
        };
        let (records, errors) = map_alert_tree(&tree(), &settings);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.tags.values().all(|v| !v.is_empty())));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "alert node 4 (Users): no path below branch \"Users\" to use as tag value"
        );
    }

    #[test]
    fn test_root_tag_on_single_node_tree_is_reported() {
        let tree = AlertTree::new(vec![AlertNode::new(0, None, "SAP", HealthState::Green)])
            .unwrap();
        let settings = Settings {
            tag_name: "ROOT".to_string(),
            ..Settings::default()
        };
        let (records, errors) = map_alert_tree(&tree, &settings);
        assert!(records.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("no branch"));
    }

    #[test]
    fn test_oversized_number_stays_text() {
        let description = format!("{} %", "9".repeat(400));
        let tree = AlertTree::new(vec![
            AlertNode::new(0, None, "SAP", HealthState::Green),
            AlertNode::new(1, Some(0), "Disk", HealthState::Green)
                .with_description(description.as_str()),
        ])
        .unwrap();

        let (records, errors) = map_alert_tree(&tree, &Settings::default());
        assert!(errors.is_empty());
        assert_eq!(records[0].tag("ccms"), Some("Disk"));
        assert!(!records[0].has_field(FLOAT_FIELD));
        assert_eq!(
            records[0].field(STRING_FIELD).and_then(FieldValue::as_str),
            Some(description.as_str())
        );
    }

    #[test]
    fn test_childless_tree_root_is_reported() {
        let tree = AlertTree::new(vec![AlertNode::new(0, None, "SAP", HealthState::Green)])
            .unwrap();
        let (records, errors) = map_alert_tree(&tree, &Settings::default());
        assert!(records.is_empty());
        assert_eq!(
            errors[0].message,
            "alert node 0 (SAP): the tree root itself has no path to use as tag value"
        );
    }

    #[test]
    fn test_subtree_root_keeps_full_path() {
        let settings = Settings {
            root_node: 1,
            ..Settings::default()
        };
        let (records, _) = map_alert_tree(&tree(), &settings);
        let tags: Vec<_> = records.iter().filter_map(|r| r.tag("ccms")).collect();
        assert_eq!(tags, ["Host CPU in %", "Host Dialog Status"]);
    }

    #[test]
    fn test_space_replacement_after_concatenation() {
        let settings = Settings {
            replace_spaces: true,
            delimiter: ".".to_string(),
            ..Settings::default()
        };
        let (records, _) = map_alert_tree(&tree(), &settings);
        let tags: Vec<_> = records.iter().filter_map(|r| r.tag("ccms")).collect();
        assert_eq!(tags, ["Host.CPU.in.%", "Host.Dialog.Status", "Users"]);
        for record in &records {
            for (k, v) in &record.tags {
                assert!(!k.contains(' ') && !v.contains(' '));
            }
        }
    }

    #[test]
    fn test_timestamp_scopes() {
        let cases = [
            (TimestampScope::All, Some(NANOS), Some(NANOS)),
            (TimestampScope::Float, Some(NANOS), None),
            (TimestampScope::String, None, Some(NANOS)),
        ];

        for (scope, cpu_ts, status_ts) in cases {
            let settings = Settings {
                source_timestamp: true,
                timestamp_scope: scope,
                ..Settings::default()
            };
            let (records, _) = map_alert_tree(&tree(), &settings);
            assert_eq!(records[0].timestamp, cpu_ts, "{scope:?} cpu");
            assert_eq!(records[1].timestamp, status_ts, "{scope:?} status");
            // Users has no time, so there is nothing to attach.
            assert_eq!(records[2].timestamp, None, "{scope:?} users");
        }
    }

    #[test]
    fn test_timestamps_off_by_default() {
        let (records, _) = map_alert_tree(&tree(), &Settings::default());
        assert!(records.iter().all(|r| r.timestamp.is_none()));
    }

    #[test]
    fn test_unknown_root_is_reported() {
        let settings = Settings {
            root_node: 99,
            ..Settings::default()
        };
        let (records, errors) = map_alert_tree(&tree(), &settings);
        assert!(records.is_empty());
        assert_eq!(errors[0].message, "root node 99 not found in alert tree");
    }

    #[test]
    fn test_orphan_leaf_is_reported() {
        let tree = AlertTree::new(vec![
            AlertNode::new(0, None, "SAP", HealthState::Green),
            AlertNode::new(1, Some(0), "Host", HealthState::Green),
            AlertNode::new(2, Some(1), "Gone", HealthState::Green),
        ])
        .unwrap();
        // Rebuild with the middle node missing so node 2 points nowhere.
        let broken = AlertTree::new(
            tree.iter()
                .filter(|n| n.id != 1)
                .cloned()
                .chain([AlertNode::new(5, Some(2), "Leaf", HealthState::Red)])
                .collect(),
        )
        .unwrap();

        let settings = Settings {
            root_node: 2,
            ..Settings::default()
        };
        let (records, errors) = map_alert_tree(&broken, &settings);
        assert!(records.is_empty());
        assert!(errors[0].message.starts_with("alert node 5 (Leaf): no path"));
    }
}
