//! Process list entries.

use chrono::{DateTime, Utc};

use crate::HealthState;

/// One row of a `GetProcessList` result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessEntry {
    /// Process name, e.g. `msg_server` or `disp+work`.
    pub name: String,

    /// Human readable description, e.g. `MessageServer`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    /// Display status of the process.
    pub health_state: HealthState,

    /// Textual status, e.g. `Running` or `Stopped`.
    pub status_text: String,

    /// When the process was started, if sapcontrol reported it.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub start_time: Option<DateTime<Utc>>,

    /// Seconds elapsed since the process started.
    pub elapsed_seconds: f64,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub pid: Option<u32>,
}

impl ProcessEntry {
    pub fn new(
        name: impl Into<String>,
        health_state: HealthState,
        status_text: impl Into<String>,
        elapsed_seconds: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            health_state,
            status_text: status_text.into(),
            start_time: None,
            elapsed_seconds,
            pid: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }
}
