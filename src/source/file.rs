//! File-based data source.
//!
//! Reads sapcontrol output that was captured to a file earlier, e.g. by a
//! cron job running `sapcontrol -nr 00 -function GetAlertTree > alerts.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_text, SnapshotSource, SourceError};
use sapmon_types::Snapshot;

/// A data source that reads one snapshot from a file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn read(&mut self) -> Result<Snapshot, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|error| SourceError::Io {
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
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_output() -> &'static str {
        "16.10.2026 10:00:00\n\
         GetAlertTree\n\
         OK\n\
         name, parent, ActualValue, description, Time\n\
         SAP, -1, GREEN, , 2026 10 16 08:00:00\n\
         Host, 0, GREEN, , 2026 10 16 08:00:00\n\
         CPU, 1, YELLOW, 95 %, 2026 10 16 08:00:00\n"
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/alerts.txt");
        assert_eq!(source.path(), Path::new("/tmp/alerts.txt"));
        assert_eq!(source.description(), "file: /tmp/alerts.txt");
    }

    #[test]
    fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_output()).unwrap();

        let mut source = FileSource::new(file.path());
        let snapshot = source.read().unwrap();
        assert_eq!(snapshot.function(), "GetAlertTree");
        assert_eq!(snapshot.result.len(), 3);
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/alerts.txt");
        let err = source.read().unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/path/alerts.txt"));
    }

    #[test]
    fn test_file_source_failed_call() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "16.10.2026 10:00:00\nGetAlertTree\nFAIL: NIECONN_REFUSED").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(matches!(
            source.read().unwrap_err(),
            SourceError::Parse { .. }
        ));
    }
}
