//! Output emitters for metric records.
//!
//! Records are written one per line, either as InfluxDB line protocol or as
//! JSON objects. Processing errors are appended after the records when
//! requested.

use std::io::{self, Write};

use clap::ValueEnum;
use sapmon_types::{FieldValue, MetricRecord, ProcessingError};

/// Line format of emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// InfluxDB line protocol.
    #[default]
    Line,
    /// One JSON object per line.
    Json,
}

/// Writes records to an underlying writer.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Write a single record followed by a newline.
    pub fn emit(&mut self, record: &MetricRecord) -> io::Result<()> {
        match self.format {
            OutputFormat::Line => writeln!(self.writer, "{}", format_line(record)),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, record)?;
                self.writer.write_all(b"\n")
            }
        }
    }

    /// Write all records in order.
    pub fn emit_all(&mut self, records: &[MetricRecord]) -> io::Result<()> {
        records.iter().try_for_each(|record| self.emit(record))
    }

    /// Write the processing error block. Nothing is written for an empty
    /// list.
    pub fn report_errors(&mut self, errors: &[ProcessingError]) -> io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        write!(self.writer, "\n\nPROCESSING ERRORS:\n")?;
        for error in errors {
            writeln!(self.writer, "{}", error)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Format a record as one line of InfluxDB line protocol, without the
/// trailing newline.
///
/// Tags with an empty value are left out; line protocol cannot express
/// them.
pub fn format_line(record: &MetricRecord) -> String {
    let mut line = escape_measurement(&record.measurement);

    for (key, value) in &record.tags {
        if value.is_empty() {
            continue;
        }
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }

    let fields = record
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", escape_key(key), format_field(value)))
        .collect::<Vec<_>>()
        .join(",");
    line.push(' ');
    line.push_str(&fields);

    if let Some(ts) = record.timestamp {
        line.push(' ');
        line.push_str(&ts.to_string());
    }

    line
}

fn format_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(v) => format!("{}i", v),
        FieldValue::Float(v) => format!("{}", v),
        FieldValue::String(v) => format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")),
    }
}

/// Escape a measurement name: commas and spaces.
fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

/// Escape a tag key, tag value or field key: commas, equals signs and spaces.
fn escape_key(s: &str) -> String {
    s.replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}
