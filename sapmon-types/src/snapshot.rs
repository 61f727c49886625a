//! Snapshot - one parsed sapcontrol invocation.

use std::fmt;

use crate::{AlertTree, ProcessEntry};

/// The result of a sapcontrol web method.
///
/// The set of supported methods is closed: anything other than these two is
/// rejected while reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "data"))]
pub enum MonitoringResult {
    ProcessList(Vec<ProcessEntry>),
    AlertTree(AlertTree),
}

impl MonitoringResult {
    /// The sapcontrol function that produces this kind of result.
    pub fn function(&self) -> &'static str {
        match self {
            MonitoringResult::ProcessList(_) => "GetProcessList",
            MonitoringResult::AlertTree(_) => "GetAlertTree",
        }
    }

    /// Number of process rows or alert nodes.
    pub fn len(&self) -> usize {
        match self {
            MonitoringResult::ProcessList(entries) => entries.len(),
            MonitoringResult::AlertTree(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single entry that could not be fully interpreted.
///
/// Processing errors never abort a conversion; they are collected and
/// reported after all records have been written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingError {
    pub message: String,
}

impl ProcessingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A parsed monitoring snapshot together with its per-entry errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub result: MonitoringResult,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub errors: Vec<ProcessingError>,
}

impl Snapshot {
    pub fn new(result: MonitoringResult) -> Self {
        Self {
            result,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ProcessingError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn function(&self) -> &'static str {
        self.result.function()
    }
}
