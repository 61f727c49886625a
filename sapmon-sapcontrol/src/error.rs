//! Error types for the sapcontrol reader.

use thiserror::Error;

/// Errors that make a whole sapcontrol snapshot unusable.
///
/// Problems with individual rows are not errors at this level; they are
/// collected as [`sapmon_types::ProcessingError`]s next to the result.
#[derive(Debug, Error)]
pub enum SapControlError {
    /// Reading the input failed.
    #[error("failed to read sapcontrol output: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a required line.
    #[error("sapcontrol output is missing the {0} line")]
    MissingLine(&'static str),

    /// sapcontrol reported that the call itself failed.
    #[error("sapcontrol call {function} failed: {message}")]
    Failed { function: String, message: String },

    /// The status line is neither `OK` nor `FAIL`.
    #[error("unexpected sapcontrol status line: {0:?}")]
    UnexpectedStatus(String),

    /// A column needed to build the result is absent from the header.
    #[error("sapcontrol function {function} output has no {column:?} column")]
    MissingColumn {
        function: &'static str,
        column: &'static str,
    },

    /// Two alert nodes share an id.
    #[error("alert tree contains node id {0} twice")]
    DuplicateNode(i64),

    /// There is no mapping for this sapcontrol function.
    #[error("sapcontrol function \"{0}\" not implemented yet")]
    UnsupportedFunction(String),
}

impl From<sapmon_types::DuplicateNodeId> for SapControlError {
    fn from(err: sapmon_types::DuplicateNodeId) -> Self {
        SapControlError::DuplicateNode(err.0)
    }
}
