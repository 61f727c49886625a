//! # sapmon-sapcontrol
//!
//! Reader for the text output of SAP's `sapcontrol` tool.
//!
//! This crate turns the output of `GetProcessList` and `GetAlertTree` into a
//! [`Snapshot`], and provides the value/unit extraction used for CCMS node
//! descriptions.
//!
//! ## Supported Functions
//!
//! - **GetProcessList**: one [`ProcessEntry`](sapmon_types::ProcessEntry) per row
//! - **GetAlertTree**: an [`AlertTree`](sapmon_types::AlertTree) with row positions as node ids
//!
//! Any other function is rejected with [`SapControlError::UnsupportedFunction`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sapmon_sapcontrol::parse;
//! use sapmon_types::MonitoringResult;
//!
//! let output = "\
//! 16.10.2026 10:00:00
//! GetProcessList
//! OK
//! name, description, dispstatus, textstatus, starttime, elapsedtime, pid
//! msg_server, MessageServer, GREEN, Running, 2026 10 16 08:59:59, 1:00:01, 1234
//! ";
//!
//! let snapshot = parse(output).unwrap();
//! match snapshot.result {
//!     MonitoringResult::ProcessList(entries) => assert_eq!(entries[0].name, "msg_server"),
//!     MonitoringResult::AlertTree(_) => unreachable!(),
//! }
//! ```

pub mod error;
pub mod reader;
pub mod time;
pub mod value;

mod alert_tree;
mod process_list;

use std::io::Read;

use sapmon_types::{MonitoringResult, Snapshot};
use tracing::debug;

pub use alert_tree::{alert_tree, GET_ALERT_TREE};
pub use error::SapControlError;
pub use process_list::{process_list, GET_PROCESS_LIST};
pub use reader::{RawOutput, Row};
pub use value::{must_float, parse_value_unit, Number, ValueUnit};

/// Parse sapcontrol output into a snapshot.
pub fn parse(text: &str) -> Result<Snapshot, SapControlError> {
    let raw = RawOutput::parse(text)?;
    debug!(
        function = %raw.function,
        columns = raw.header.len(),
        rows = raw.rows.len(),
        "read sapcontrol output"
    );

    let snapshot = match raw.function.as_str() {
        GET_PROCESS_LIST => {
            let (entries, errors) = process_list(&raw)?;
            Snapshot::new(MonitoringResult::ProcessList(entries)).with_errors(errors)
        }
        GET_ALERT_TREE => {
            let (tree, errors) = alert_tree(&raw)?;
            Snapshot::new(MonitoringResult::AlertTree(tree)).with_errors(errors)
        }
        other => return Err(SapControlError::UnsupportedFunction(other.to_string())),
    };

    Ok(snapshot)
}

/// Read all of `reader` and parse it as sapcontrol output.
pub fn read<R: Read>(mut reader: R) -> Result<Snapshot, SapControlError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text)
}
