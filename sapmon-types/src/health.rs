//! Health states reported by sapcontrol.

use core::fmt;

/// SAP severity classification of a process or alert node.
///
/// sapcontrol reports these as the exact upper-case tokens `GREEN`, `YELLOW`,
/// `RED` and `GRAY`. Anything else is kept as [`HealthState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum HealthState {
    Green,
    Yellow,
    Red,
    Gray,
    #[default]
    Unknown,
}

impl HealthState {
    /// Parse a sapcontrol token. Matching is case sensitive and never fails.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GREEN" => HealthState::Green,
            "YELLOW" => HealthState::Yellow,
            "RED" => HealthState::Red,
            "GRAY" => HealthState::Gray,
            _ => HealthState::Unknown,
        }
    }

    /// Icinga-style severity code: 0 ok, 1 warning, 2 critical, 3 unknown.
    ///
    /// Unrecognized input maps to -1.
    pub const fn severity(self) -> i64 {
        match self {
            HealthState::Green => 0,
            HealthState::Yellow => 1,
            HealthState::Red => 2,
            HealthState::Gray => 3,
            HealthState::Unknown => -1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            HealthState::Green => "GREEN",
            HealthState::Yellow => "YELLOW",
            HealthState::Red => "RED",
            HealthState::Gray => "GRAY",
            HealthState::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for HealthState {
    fn from(token: &str) -> Self {
        HealthState::from_token(token)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
