//! Conversion of monitoring snapshots into metric records.
//!
//! This is a single pass: dispatch on the result kind, run the matching
//! mapper, and collect per-entry errors next to the records. No state is
//! kept between records.

mod alert;
mod process;
mod status;

pub use alert::map_alert_tree;
pub use process::map_process_list;
pub use status::normalize;

use sapmon_types::{MetricRecord, MonitoringResult, ProcessingError, Snapshot};
use tracing::debug;

use crate::config::Settings;

/// Records produced from one snapshot, plus everything that went wrong
/// along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    pub records: Vec<MetricRecord>,
    /// Reader errors first, then mapper errors.
    pub errors: Vec<ProcessingError>,
}

/// Convert a snapshot with the given settings.
pub fn convert(snapshot: Snapshot, settings: &Settings) -> Conversion {
    let function = snapshot.function();
    let mut errors = snapshot.errors;

    let records = match &snapshot.result {
        MonitoringResult::ProcessList(entries) => map_process_list(entries, settings),
        MonitoringResult::AlertTree(tree) => {
            debug!(root_node = settings.root_node, "selecting alert tree leaves");
            let (records, mapping_errors) = map_alert_tree(tree, settings);
            errors.extend(mapping_errors);
            records
        }
    };

    debug!(
        function,
        records = records.len(),
        errors = errors.len(),
        "converted snapshot"
    );

    Conversion { records, errors }
}
