//! `GetAlertTree` table.

use sapmon_types::{AlertNode, AlertTree, HealthState, ProcessingError};
use tracing::trace;

use crate::reader::RawOutput;
use crate::time::parse_sap_time;
use crate::SapControlError;

pub const GET_ALERT_TREE: &str = "GetAlertTree";

/// Build an alert tree from a `GetAlertTree` table.
///
/// A node's id is its zero-based row position and `parent` refers to that
/// position; a negative parent marks the tree root. Rows that are too short
/// are skipped, and their id stays unused so later parent references still
/// line up. An unreadable parent detaches the node; an unreadable time
/// drops the time. Both are reported.
pub fn alert_tree(raw: &RawOutput) -> Result<(AlertTree, Vec<ProcessingError>), SapControlError> {
    let mut nodes = Vec::with_capacity(raw.rows.len());
    let mut errors = Vec::new();

    if !raw.has_table() {
        return Ok((AlertTree::default(), errors));
    }

    let name_col = raw.require_column(GET_ALERT_TREE, "name")?;
    let parent_col = raw.require_column(GET_ALERT_TREE, "parent")?;
    let value_col = raw.require_column(GET_ALERT_TREE, "actualvalue")?;
    let description_col = raw.require_column(GET_ALERT_TREE, "description")?;
    let time_col = raw.column("time");

    for (id, row) in (0i64..).zip(&raw.rows) {
        let (Some(name), Some(parent), Some(state), Some(description)) = (
            row.get(name_col),
            row.get(parent_col),
            row.get(value_col),
            row.get(description_col),
        ) else {
            errors.push(ProcessingError::new(format!(
                "line {}: alert node {}: expected {} columns, got {}",
                row.line,
                id,
                raw.header.len(),
                row.cells.len()
            )));
            continue;
        };

        let parent_id = match parent.parse::<i64>() {
            Ok(p) if p < 0 => None,
            Ok(p) => Some(p),
            Err(_) => {
                errors.push(ProcessingError::new(format!(
                    "line {}: alert node {} ({}): invalid parent {:?}",
                    row.line, id, name, parent
                )));
                None
            }
        };

        let mut node = AlertNode::new(id, parent_id, name, HealthState::from_token(state))
            .with_description(description);

        if let Some(time) = time_col.and_then(|c| row.get(c)).filter(|t| !t.is_empty()) {
            match parse_sap_time(time) {
                Some(t) => node = node.with_time(t),
                None => errors.push(ProcessingError::new(format!(
                    "line {}: alert node {} ({}): invalid time {:?}",
                    row.line, id, name, time
                ))),
            }
        }

        trace!(id, parent = ?node.parent_id, name = %node.name, "read alert node");
        nodes.push(node);
    }

    Ok((AlertTree::new(nodes)?, errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(body: &str) -> RawOutput {
        RawOutput::parse(&format!(
            "16.10.2026 10:00:00\nGetAlertTree\nOK\n\
             name, parent, ActualValue, description, Time, AnalyseToolString, VisibleLevel, HighAlertValue, AlUniqueNum, AlertObjectName\n{}",
            body
        ))
        .unwrap()
    }

    const TREE: &str = "\
PRD\\SAP CCMS Monitor Templates\\Entire System, -1, YELLOW, , 2026 10 16 08:00:00, , 1, YELLOW, 0, SAP\n\
Host, 0, YELLOW, , 2026 10 16 08:00:00, , 2, YELLOW, 0, Host\n\
CPU Utilization, 1, YELLOW, 95 %, 2026 10 16 08:00:00, RZ20, 3, YELLOW, 1, CPU\n\
Status, 1, GREEN, Running, , , 3, GREEN, 2, Status\n";

    #[test]
    fn test_nodes_and_parents() {
        let (tree, errors) = alert_tree(&raw(TREE)).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(tree.len(), 4);

        let root = tree.get(0).unwrap();
        assert_eq!(root.parent_id, None);
        assert_eq!(root.health_state, HealthState::Yellow);

        let cpu = tree.get(2).unwrap();
        assert_eq!(cpu.name, "CPU Utilization");
        assert_eq!(cpu.parent_id, Some(1));
        assert_eq!(cpu.description, "95 %");
        assert!(cpu.time.is_some());

        let status = tree.get(3).unwrap();
        assert_eq!(status.description, "Running");
        assert!(status.time.is_none());

        let leaves: Vec<_> = tree.leaves_under(0).iter().map(|n| n.id).collect();
        assert_eq!(leaves, [2, 3]);
    }

    #[test]
    fn test_short_row_keeps_ids_stable() {
        let (tree, errors) = alert_tree(&raw(
            "SAP, -1, GREEN, , , , , , , \nbroken\nDisk, 0, GREEN, 10 %, , , , , , \n",
        ))
        .unwrap();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("line 6: alert node 1:"));
        assert!(tree.get(1).is_none());
        assert_eq!(tree.get(2).unwrap().name, "Disk");
    }

    #[test]
    fn test_bad_parent_and_time_are_reported() {
        let (tree, errors) = alert_tree(&raw(
            "SAP, -1, GREEN, , , , , , , \nDisk, zero, GREEN, 10 %, yesterday, , , , , \n",
        ))
        .unwrap();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("invalid parent \"zero\""));
        assert!(errors[1].message.contains("invalid time \"yesterday\""));

        let disk = tree.get(1).unwrap();
        assert_eq!(disk.parent_id, None);
        assert!(disk.time.is_none());
    }

    #[test]
    fn test_missing_description_column() {
        let raw = RawOutput::parse("banner\nGetAlertTree\nOK\nname, parent, ActualValue\n").unwrap();
        assert!(matches!(
            alert_tree(&raw).unwrap_err(),
            SapControlError::MissingColumn {
                column: "description",
                ..
            }
        ));
    }
}
