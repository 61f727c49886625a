//! `GetProcessList` table.

use sapmon_types::{HealthState, ProcessEntry, ProcessingError};
use tracing::trace;

use crate::reader::RawOutput;
use crate::time::{parse_elapsed, parse_sap_time};
use crate::SapControlError;

pub const GET_PROCESS_LIST: &str = "GetProcessList";

/// Build process entries from a `GetProcessList` table.
///
/// Rows without a usable name or elapsed time are skipped and reported.
/// A bad start time or pid is reported but the row is kept. An empty start
/// time is normal for stopped processes.
pub fn process_list(
    raw: &RawOutput,
) -> Result<(Vec<ProcessEntry>, Vec<ProcessingError>), SapControlError> {
    let mut entries = Vec::with_capacity(raw.rows.len());
    let mut errors = Vec::new();

    if !raw.has_table() {
        return Ok((entries, errors));
    }

    let name_col = raw.require_column(GET_PROCESS_LIST, "name")?;
    let status_col = raw.require_column(GET_PROCESS_LIST, "dispstatus")?;
    let text_col = raw.require_column(GET_PROCESS_LIST, "textstatus")?;
    let elapsed_col = raw.require_column(GET_PROCESS_LIST, "elapsedtime")?;
    let description_col = raw.column("description");
    let start_col = raw.column("starttime");
    let pid_col = raw.column("pid");

    for row in &raw.rows {
        let name = match row.get(name_col) {
            Some(name) if !name.is_empty() => name,
            _ => {
                errors.push(ProcessingError::new(format!(
                    "line {}: process row has no name",
                    row.line
                )));
                continue;
            }
        };

        let (Some(status), Some(text), Some(elapsed)) =
            (row.get(status_col), row.get(text_col), row.get(elapsed_col))
        else {
            errors.push(ProcessingError::new(format!(
                "line {}: process {}: expected {} columns, got {}",
                row.line,
                name,
                raw.header.len(),
                row.cells.len()
            )));
            continue;
        };

        let Some(elapsed_seconds) = parse_elapsed(elapsed) else {
            errors.push(ProcessingError::new(format!(
                "line {}: process {}: invalid elapsed time {:?}",
                row.line, name, elapsed
            )));
            continue;
        };

        let mut entry =
            ProcessEntry::new(name, HealthState::from_token(status), text, elapsed_seconds);

        if let Some(description) = description_col.and_then(|c| row.get(c)) {
            entry = entry.with_description(description);
        }

        if let Some(start) = start_col.and_then(|c| row.get(c)).filter(|s| !s.is_empty()) {
            match parse_sap_time(start) {
                Some(time) => entry = entry.with_start_time(time),
                None => errors.push(ProcessingError::new(format!(
                    "line {}: process {}: invalid start time {:?}",
                    row.line, name, start
                ))),
            }
        }

        if let Some(pid) = pid_col.and_then(|c| row.get(c)).filter(|p| !p.is_empty()) {
            match pid.parse::<u32>() {
                Ok(pid) => entry = entry.with_pid(pid),
                Err(_) => errors.push(ProcessingError::new(format!(
                    "line {}: process {}: invalid pid {:?}",
                    row.line, name, pid
                ))),
            }
        }

        trace!(process = %entry.name, state = %entry.health_state, "read process row");
        entries.push(entry);
    }

    Ok((entries, errors))
}
