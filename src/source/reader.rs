//! Reader-based data source (stdin, pipes, in-memory buffers).

use std::fmt;
use std::io::{self, Read, Stdin};

use super::{parse_text, SnapshotSource, SourceError};
use sapmon_types::Snapshot;

/// A source that reads sapcontrol output from any [`Read`] implementation.
///
/// This is the normal mode of operation: `sapcontrol ... | sapmon`.
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl ReaderSource<Stdin> {
    /// Read from standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin(), "stdin")
    }
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, description: impl Into<String>) -> Self {
        Self {
            reader,
            description: description.into(),
        }
    }
}

impl<R> fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSource")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<R: Read> SnapshotSource for ReaderSource<R> {
    fn read(&mut self) -> Result<Snapshot, SourceError> {
        let mut text = String::new();
        self.reader
            .read_to_string(&mut text)
            .map_err(|error| SourceError::Io {
                source_name: self.description.clone(),
                error,
            })?;
        parse_text(&text, &self.description)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapmon_types::MonitoringResult;

    #[test]
    fn test_reads_snapshot() {
        let input = "16.10.2026 10:00:00\nGetProcessList\nOK\n\
                     name, description, dispstatus, textstatus, starttime, elapsedtime, pid\n\
                     msg_server, MessageServer, GREEN, Running, 2026 10 16 08:59:59, 1:00:01, 1234\n";
        let mut source = ReaderSource::new(input.as_bytes(), "test");

        let snapshot = source.read().unwrap();
        match snapshot.result {
            MonitoringResult::ProcessList(entries) => assert_eq!(entries.len(), 1),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_names_source() {
        let mut source = ReaderSource::new("x\nGetSomethingElse\nOK\n".as_bytes(), "pipe");
        let err = source.read().unwrap_err();
        assert_eq!(err.to_string(), "invalid sapcontrol output from pipe");
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut source = ReaderSource::new([0xffu8, 0xfe].as_slice(), "bytes");
        assert!(matches!(source.read().unwrap_err(), SourceError::Io { .. }));
    }
}
