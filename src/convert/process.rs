//! Process list mapping.

use sapmon_types::{MetricRecord, ProcessEntry, ACTUAL_VALUE_FIELD, FLOAT_FIELD, STRING_FIELD};

use crate::config::Settings;

/// One record per process, in input order.
///
/// Process records never carry a timestamp: sapcontrol only reports a start
/// time and an elapsed duration, which can lag far behind, so ingestion time
/// is used instead.
pub fn map_process_list(entries: &[ProcessEntry], settings: &Settings) -> Vec<MetricRecord> {
    entries
        .iter()
        .map(|entry| process_record(entry, settings))
        .collect()
}

fn process_record(entry: &ProcessEntry, settings: &Settings) -> MetricRecord {
    MetricRecord::builder(settings.measurement.as_str())
        .tag(settings.replace(&settings.tag_name), settings.replace(&entry.name))
        .field(ACTUAL_VALUE_FIELD, entry.health_state.severity())
        .field(STRING_FIELD, entry.status_text.as_str())
        .field(FLOAT_FIELD, entry.elapsed_seconds)
        .build()
}
