//! Sources of sapcontrol snapshots.
//!
//! A source reads the complete sapcontrol output once and parses it. Any
//! failure here is fatal for the run: without a snapshot there is nothing to
//! convert.

mod file;
mod reader;

pub use file::FileSource;
pub use reader::ReaderSource;

use std::fmt::Debug;

use sapmon_sapcontrol::SapControlError;
use sapmon_types::Snapshot;
use thiserror::Error;

/// Errors raised while obtaining a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("invalid sapcontrol output from {source_name}")]
    Parse {
        source_name: String,
        #[source]
        error: SapControlError,
    },
}

/// Trait for reading a snapshot from somewhere.
///
/// # Example
///
/// ```
/// use sapmon::{ReaderSource, SnapshotSource};
///
/// let input = "banner\nGetProcessList\nOK\n";
/// let mut source = ReaderSource::new(input.as_bytes(), "inline");
/// let snapshot = source.read().unwrap();
/// assert_eq!(snapshot.function(), "GetProcessList");
/// ```
pub trait SnapshotSource: Debug {
    /// Read and parse the snapshot.
    fn read(&mut self) -> Result<Snapshot, SourceError>;

    /// Human readable description of the source, used in errors and logs.
    fn description(&self) -> &str;
}

fn parse_text(text: &str, source_name: &str) -> Result<Snapshot, SourceError> {
    sapmon_sapcontrol::parse(text).map_err(|error| SourceError::Parse {
        source_name: source_name.to_string(),
        error,
    })
}
