//! # sapmon
//!
//! Converts SAP `sapcontrol` monitoring output into time-series metric
//! records for InfluxDB or any other line-protocol consumer.
//!
//! Two sapcontrol functions are understood:
//!
//! - **GetProcessList**: one record per process, tagged with the process name
//! - **GetAlertTree**: one record per terminal CCMS node beneath a configured
//!   root, tagged with the node's path in the tree
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌──────────┐    ┌──────────┐
//! │  source  │───▶│ sapcontrol  │───▶│ convert  │───▶│  output  │
//! │ (stdin,  │    │  (Snapshot) │    │ (records)│    │ (lines)  │
//! │  file)   │    └─────────────┘    └──────────┘    └──────────┘
//! └──────────┘
//! ```
//!
//! - **[`source`]**: where the raw sapcontrol text comes from ([`SnapshotSource`])
//! - **[`config`]**: layered [`Settings`] shared by both mappers
//! - **[`convert`]**: the process list and alert tree mappers
//! - **[`output`]**: line protocol and JSON emitters
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! sapcontrol -nr 00 -function GetProcessList | sapmon
//! sapcontrol -nr 00 -function GetAlertTree | sapmon -n 12 -p ROOT -r -d _
//! ```
//!
//! ### As a library
//!
//! ```
//! use sapmon::{convert, format_line, ReaderSource, Settings, SnapshotSource};
//!
//! let input = "\
//! 16.10.2026 10:00:00
//! GetProcessList
//! OK
//! name, description, dispstatus, textstatus, starttime, elapsedtime, pid
//! msg_server, MessageServer, GREEN, Running, 2026 10 16 08:59:59, 1:01:01, 1234
//! ";
//!
//! let snapshot = ReaderSource::new(input.as_bytes(), "example").read().unwrap();
//! let conversion = convert(snapshot, &Settings::default());
//!
//! assert_eq!(
//!     format_line(&conversion.records[0]),
//!     "sapmon,ccms=msg_server ActualValue=0i,float=3661,string=\"Running\""
//! );
//! ```

pub mod config;
pub mod convert;
pub mod output;
pub mod source;

pub use config::{Overrides, Settings, SettingsError, TimestampScope, ROOT_TAG};
pub use convert::{convert, map_alert_tree, map_process_list, normalize, Conversion};
pub use output::{format_line, Emitter, OutputFormat};
pub use source::{FileSource, ReaderSource, SnapshotSource, SourceError};

pub use sapmon_types as types;
