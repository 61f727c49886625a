//! Line-level reader for sapcontrol script output.
//!
//! `sapcontrol -format script` style output looks like:
//!
//! ```text
//! 16.10.2026 10:00:00
//! GetProcessList
//! OK
//! name, description, dispstatus, textstatus, starttime, elapsedtime, pid
//! msg_server, MessageServer, GREEN, Running, 2026 10 16 08:00:00, 1:01:01, 1234
//! ```
//!
//! The first three non-empty lines are the timestamp banner, the function
//! name and the call status. Everything after is a comma-separated table
//! whose first line is the header.

use crate::SapControlError;

/// One data line of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the input.
    pub line: usize,
    pub cells: Vec<String>,
}

impl Row {
    pub fn get(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// sapcontrol output split into its banner, status and table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub banner: String,
    pub function: String,
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl RawOutput {
    /// Split sapcontrol output into lines and cells.
    ///
    /// Fails when the banner, function or status line is missing, or when
    /// the status reports a failed call.
    pub fn parse(text: &str) -> Result<Self, SapControlError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, banner) = lines.next().ok_or(SapControlError::MissingLine("timestamp"))?;
        let (_, function) = lines.next().ok_or(SapControlError::MissingLine("function"))?;
        let (_, status) = lines.next().ok_or(SapControlError::MissingLine("status"))?;

        let function = function.to_string();
        if let Some(message) = status.strip_prefix("FAIL") {
            return Err(SapControlError::Failed {
                function,
                message: message.trim_start_matches(':').trim().to_string(),
            });
        }
        if status != "OK" {
            return Err(SapControlError::UnexpectedStatus(status.to_string()));
        }

        let header: Vec<String> = lines.next().map(|(_, h)| split_cells(h)).unwrap_or_default();

        // Descriptions may contain the separator; surplus cells are folded
        // back into the description column.
        let description = header
            .iter()
            .position(|h| h.eq_ignore_ascii_case("description"));

        let rows = lines
            .map(|(line, text)| Row {
                line,
                cells: fold_surplus(split_cells(text), header.len(), description),
            })
            .collect();

        Ok(Self {
            banner: banner.to_string(),
            function,
            header,
            rows,
        })
    }

    /// Position of a header column, compared case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Position of a column the caller cannot do without.
    pub(crate) fn require_column(
        &self,
        function: &'static str,
        column: &'static str,
    ) -> Result<usize, SapControlError> {
        self.column(column)
            .ok_or(SapControlError::MissingColumn { function, column })
    }

    /// True when sapcontrol returned no table at all.
    pub fn has_table(&self) -> bool {
        !self.header.is_empty()
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

fn fold_surplus(mut cells: Vec<String>, width: usize, into: Option<usize>) -> Vec<String> {
    let Some(col) = into else {
        return cells;
    };
    if width == 0 || cells.len() <= width || col >= width {
        return cells;
    }

    let surplus = cells.len() - width;
    let merged = cells.drain(col..=col + surplus).collect::<Vec<_>>().join(", ");
    cells.insert(col, merged);
    cells
}
